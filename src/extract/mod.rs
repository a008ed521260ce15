//! Contact extraction
//!
//! Stateless text recognizers for every [`ContactType`]. [`extract`] runs
//! them in a fixed order and concatenates their output, so the result for a
//! given text is always the same sequence.

mod email;
mod messaging;
mod phone;
mod social;

pub use email::extract_emails;
pub use messaging::{extract_qq, extract_telegram, extract_wechat, extract_whatsapp};
pub use phone::extract_phones;
pub use social::extract_social_links;

use crate::record::ContactType;
use phonenumber::country;

/// Region used for phone numbers without a country code
pub const DEFAULT_REGION: country::Id = country::Id::CN;

/// Extracts all contacts from `text`, reading local phone numbers as Chinese
pub fn extract(text: &str) -> Vec<(ContactType, String)> {
    extract_with_region(text, DEFAULT_REGION)
}

/// Extracts all contacts from `text`
///
/// Output order is email, phone, wechat, qq, telegram, whatsapp, social.
/// Within a type, emails keep first-seen order and everything else is sorted.
pub fn extract_with_region(text: &str, region: country::Id) -> Vec<(ContactType, String)> {
    let groups = [
        (ContactType::Email, extract_emails(text)),
        (ContactType::Phone, extract_phones(text, region)),
        (ContactType::Wechat, extract_wechat(text)),
        (ContactType::Qq, extract_qq(text)),
        (ContactType::Telegram, extract_telegram(text)),
        (ContactType::Whatsapp, extract_whatsapp(text)),
        (ContactType::Social, extract_social_links(text)),
    ];

    groups
        .into_iter()
        .flat_map(|(kind, values)| values.into_iter().map(move |value| (kind, value)))
        .collect()
}
