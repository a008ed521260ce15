use crate::record::Language;

/// Classifies a page by its raw HTML
///
/// Any CJK unified ideograph (U+4E00..=U+9FFF) anywhere in the document,
/// markup included, makes the page Chinese.
pub fn classify_language(html: &str) -> Language {
    if html.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
        Language::Zh
    } else {
        Language::En
    }
}
