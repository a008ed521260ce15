//! Messaging handle recognizers
//!
//! Each recognizer returns its matches sorted and deduplicated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static WECHAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:微信|weixin|wechat|vx|v信)[^\w]?[:：\-\s]*([A-Za-z0-9_\-]{3,})")
        .expect("wechat regex")
});

static QQ: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:QQ|扣扣)[^\d]*([1-9]\d{4,11})").expect("qq regex"));

static TELEGRAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:t\.me/([A-Za-z0-9_]{3,}))|(?:telegram[^\w]?[:：\-\s]*@([A-Za-z0-9_]{3,}))")
        .expect("telegram regex")
});

static WHATSAPP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:wa\.me/(\d{5,15}))|(?:WhatsApp[^\d]*([\+\d][\d\s\-]{6,}))")
        .expect("whatsapp regex")
});

pub fn extract_wechat(text: &str) -> Vec<String> {
    sorted_unique(WECHAT.captures_iter(text).map(|caps| caps[1].to_string()))
}

pub fn extract_qq(text: &str) -> Vec<String> {
    sorted_unique(QQ.captures_iter(text).map(|caps| caps[1].to_string()))
}

/// Telegram handles, `@`-prefixed
pub fn extract_telegram(text: &str) -> Vec<String> {
    sorted_unique(TELEGRAM.captures_iter(text).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|handle| format!("@{}", handle.as_str()))
    }))
}

/// WhatsApp numbers as `+` followed by 6 to 15 digits
pub fn extract_whatsapp(text: &str) -> Vec<String> {
    sorted_unique(WHATSAPP.captures_iter(text).filter_map(|caps| {
        let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        (6..=15)
            .contains(&digits.len())
            .then(|| format!("+{}", digits))
    }))
}

fn sorted_unique(values: impl Iterator<Item = String>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}
