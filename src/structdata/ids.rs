//! Page identifier normalization.
//!
//! Page and namespace-page values are stored as canonical wiki ids. The host
//! usually owns the exact rules, so they sit behind [`IdNormalizer`];
//! [`WikiIds`] implements the common ones:
//!
//! - lower case, whitespace becomes `_`
//! - `/` and `;` are namespace separators and become `:`
//! - anything but letters, digits and `_ . : -` becomes `_`
//! - runs of `_` or `:` collapse, and separators hugging a `:` or the ends are dropped

use once_cell::sync::Lazy;
use regex::Regex;

pub trait IdNormalizer {
    fn clean_id(&self, raw: &str) -> String;
}

static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());
static COLONS: Lazy<Regex> = Lazy::new(|| Regex::new(r":+").unwrap());
static AFTER_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r":[:._\-]+").unwrap());
static BEFORE_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:._\-]+:").unwrap());

/// Default wiki id rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiIds;

impl IdNormalizer for WikiIds {
    fn clean_id(&self, raw: &str) -> String {
        let id: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                '/' | ';' => ':',
                c if c.is_whitespace() => '_',
                c if c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '-') => c,
                _ => '_',
            })
            .collect();

        let id = UNDERSCORES.replace_all(&id, "_");
        let id = COLONS.replace_all(&id, ":");
        let id = AFTER_COLON.replace_all(&id, ":");
        let id = BEFORE_COLON.replace_all(&id, ":");
        id.trim_matches(|c| matches!(c, ':' | '.' | '_' | '-'))
            .to_string()
    }
}
