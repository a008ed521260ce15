use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Matches literal and obfuscated addresses
///
/// Obfuscated separators are `[at]`, `(at)` or a whitespace-delimited `at`,
/// and `[dot]`, `(dot)` or a whitespace-delimited `dot`. Bare words must be
/// whitespace-delimited so ordinary words containing "at" never split an
/// address.
static OBFUSCATED_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([a-z0-9._%+-]+)(?:\s*@\s*|\s*[\[(]\s*at\s*[\])]\s*|\s+at\s+)([a-z0-9-]+(?:(?:\s*[\[(]\s*dot\s*[\])]\s*|\s+dot\s+|\.)[a-z0-9-]+)*)(?:\s*[\[(]\s*dot\s*[\])]\s*|\s+dot\s+|\.)([a-z]{2,})",
    )
    .expect("obfuscated email regex")
});

static LITERAL_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("literal email regex")
});

static DOT_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\[(]\s*dot\s*[\])]\s*|\s+dot\s+").expect("dot separator regex")
});

/// Extracts email addresses, lower-cased, deduplicated in first-seen order
pub fn extract_emails(text: &str) -> Vec<String> {
    let obfuscated = OBFUSCATED_EMAIL.captures_iter(text).map(|caps| {
        let domain = DOT_SEPARATOR.replace_all(&caps[2], ".");
        normalize(&format!("{}@{}.{}", &caps[1], domain, &caps[3]))
    });
    let literal = LITERAL_EMAIL
        .find_iter(text)
        .map(|m| normalize(m.as_str()));

    let mut seen = HashSet::new();
    obfuscated
        .chain(literal)
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')') && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
