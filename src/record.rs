//! Contact record types
//!
//! A [`ContactRecord`] is one typed, normalized identifier found on a page,
//! attributed to the keyword, page and site it was discovered under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of contact identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Email,
    Phone,
    Wechat,
    Qq,
    Telegram,
    Whatsapp,
    Social,
}

impl ContactType {
    /// All contact types, in the order the extractor emits them
    pub const ALL: [ContactType; 7] = [
        Self::Email,
        Self::Phone,
        Self::Wechat,
        Self::Qq,
        Self::Telegram,
        Self::Whatsapp,
        Self::Social,
    ];

    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Wechat => "wechat",
            Self::Qq => "qq",
            Self::Telegram => "telegram",
            Self::Whatsapp => "whatsapp",
            Self::Social => "social",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_db_string() == s)
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_db_string())
    }
}

/// Page language, as classified from the raw HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// One discovered contact identifier
///
/// Two records are the same contact when `(contact_type, contact_value,
/// site_domain)` match, regardless of keyword or source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub keyword: String,
    pub lang: Language,
    pub contact_type: ContactType,
    pub contact_value: String,
    pub source_url: String,
    pub page_title: String,
    pub site_domain: String,
}

impl ContactRecord {
    /// Returns the uniqueness key of this record
    pub fn dedup_key(&self) -> (ContactType, &str, &str) {
        (self.contact_type, &self.contact_value, &self.site_domain)
    }
}
