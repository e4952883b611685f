//! Document text extraction. Supported formats: plain text (UTF-8) and PDF.
//!
//! The extension check happens before anything touches the payload, so an
//! unsupported format never reaches a capability call.

use crate::errors::AppError;

pub fn extract_document_text(bytes: &[u8], filename: &str) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".txt") {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| AppError::Extraction(format!("{filename} is not valid UTF-8: {e}")))?;
        Ok(text.trim().to_string())
    } else if lower.ends_with(".pdf") {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("failed to read {filename}: {e}")))?;
        Ok(text.trim().to_string())
    } else {
        let extension = lower
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{ext}"))
            .unwrap_or_else(|| filename.to_string());
        Err(AppError::UnsupportedFormat(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_decodes_and_trims() {
        let text = extract_document_text(b"  hello world \n", "notes.txt").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_txt_extension_is_case_insensitive() {
        let text = extract_document_text(b"ABC", "NOTES.TXT").unwrap();
        assert_eq!(text, "ABC");
    }

    #[test]
    fn test_txt_invalid_utf8_is_extraction_error() {
        let err = extract_document_text(&[0xff, 0xfe, 0x00], "notes.txt").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = extract_document_text(b"whatever", "report.docx").unwrap_err();
        match err {
            AppError::UnsupportedFormat(ext) => assert_eq!(ext, ".docx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_no_extension_is_unsupported() {
        let err = extract_document_text(b"whatever", "README").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_txt_passes_through_empty() {
        // Empty extracted text is not "no input" — it flows through unchanged.
        let text = extract_document_text(b"", "empty.txt").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let err = extract_document_text(b"not a pdf", "broken.pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
