//! Input validation and normalization per column type.
//!
//! [`clean_value`] never fails loudly: a value that does not fit its type comes
//! back as an empty string, and callers treat empty as "rejected".
//!
//! | Type | Accepts | Stores |
//! |------|---------|--------|
//! | `dt` | `2024-3-5`, `%now%` | `2024-03-05`, `%now%` |
//! | `url` | `example.com` | `http://example.com` |
//! | `mail` | `Jane Doe jane@x.com` | `jane@x.com Jane Doe` |
//! | `page`, `nspage` | `Some Page` | `some_page` |
//! | alias with enum | listed values only | the value |

use crate::ids::IdNormalizer;
use crate::model::{BaseType, ColumnType};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NOW_PLACEHOLDER: &str = "%now%";

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());
static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z]+://").unwrap());
static MAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$").unwrap()
});

/// Whether `candidate` looks like a mail address.
pub fn is_valid_mail(candidate: &str) -> bool {
    MAIL.is_match(candidate)
}

/// Validate and normalize `raw` for a column of type `column_type`.
pub fn clean_value<N: IdNormalizer + ?Sized>(
    raw: &str,
    column_type: &ColumnType,
    ids: &N,
) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    if let Some(allowed) = column_type.enumeration() {
        if !allowed.split(',').any(|option| option.trim() == value) {
            return String::new();
        }
    }

    match column_type.base() {
        BaseType::Date => clean_date(value),
        BaseType::Url => {
            if URL_SCHEME.is_match(value) {
                value.to_string()
            } else {
                format!("http://{}", value)
            }
        }
        BaseType::Mail => clean_mail(value),
        BaseType::Page | BaseType::NsPage => ids.clean_id(value),
        _ => value.to_string(),
    }
}

fn clean_date(value: &str) -> String {
    if value == NOW_PLACEHOLDER {
        return value.to_string();
    }
    let Some(caps) = DATE.captures(value) else {
        return String::new();
    };
    let parts = (caps[1].parse(), caps[2].parse(), caps[3].parse());
    match parts {
        (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// The first valid address becomes the (lower-cased) address, every other
/// word goes into the display name.
fn clean_mail(value: &str) -> String {
    let mut email: Option<String> = None;
    let mut name: Vec<&str> = Vec::new();
    for part in value.split_whitespace() {
        if email.is_none() && is_valid_mail(part) {
            email = Some(part.to_lowercase());
        } else {
            name.push(part);
        }
    }
    format!("{} {}", email.unwrap_or_default(), name.join(" "))
        .trim()
        .to_string()
}
