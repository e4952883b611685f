//! Best-effort language detection. Failures never propagate: anything the
//! detector cannot place resolves to `"en"`.

pub const FALLBACK_LANGUAGE: &str = "en";

/// Detects the language of `text`, returning an ISO-639-1 code.
pub fn detect_language(text: &str) -> String {
    whatlang::detect_lang(text)
        .and_then(|lang| isolang::Language::from_639_3(lang.code()))
        .and_then(|lang| lang.to_639_1())
        .unwrap_or(FALLBACK_LANGUAGE)
        .to_string()
}
