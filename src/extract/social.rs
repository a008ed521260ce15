use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static SOCIAL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)https?://(?:www\.)?(?:twitter|x|linkedin|facebook|weibo|zhihu|bilibili|github)\.[^\s"'<>]+"#,
    )
    .expect("social link regex")
});

/// Extracts profile links on known social platforms, sorted and deduplicated
pub fn extract_social_links(text: &str) -> Vec<String> {
    SOCIAL_LINK
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
