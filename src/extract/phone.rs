use once_cell::sync::Lazy;
use phonenumber::country;
use phonenumber::Mode;
use regex::Regex;
use std::collections::BTreeSet;

/// Loose candidate: optional country code, optional (area) code, two digit groups
static PHONE_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(?:\+?\d{1,3}[\s-]?)?(?:\(?\d{2,4}\)?[\s-]?)?\d{3,4}[\s-]?\d{3,4})")
        .expect("phone candidate regex")
});

/// Extracts valid phone numbers as sorted, deduplicated E.164 strings
///
/// Candidates without a country code are read in `region`.
pub fn extract_phones(text: &str, region: country::Id) -> Vec<String> {
    let candidates: BTreeSet<&str> = PHONE_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();

    candidates
        .into_iter()
        .filter_map(|candidate| phonenumber::parse(Some(region), candidate).ok())
        .filter(phonenumber::is_valid)
        .map(|number| number.format().mode(Mode::E164).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
