//! Run-time placeholders in query text and formatted values.
//!
//! | Placeholder | Expands to |
//! |-------------|------------|
//! | `%user%` | login name of the current user |
//! | `%groups%` | the user's groups joined with `','` |
//! | `%now%` | today as `YYYY-MM-DD` |
//! | `%lang%` | the pre-translation language if configured, else the active language |
//! | `%trans%` | the translation part of the current id, the active language for the default translation, empty without a translation scheme |
//!
//! `%groups%` is meant to sit inside quotes: `IN('%groups%')` becomes
//! `IN('admin','user')`.

use crate::config::DataConfig;
use crate::context::PageContext;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"%(user|groups|now|lang|trans)%").unwrap());

/// Substitute every placeholder in `text`.
///
/// Substitution is a single pass: expanded values are never scanned again.
pub fn expand<C: PageContext + ?Sized>(text: &str, ctx: &C, config: &DataConfig) -> String {
    if !text.contains('%') {
        return text.to_string();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "user" => ctx.user(),
            "groups" => ctx.groups().join("','"),
            "now" => ctx.today().format("%Y-%m-%d").to_string(),
            "lang" => config
                .lang_before_translation
                .clone()
                .unwrap_or_else(|| ctx.lang()),
            _ => match ctx.translation_variant() {
                Some(variant) if variant.is_empty() => ctx.lang(),
                Some(variant) => variant,
                None => String::new(),
            },
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedContext;

    #[test]
    fn user_and_groups() {
        let ctx = FixedContext::default().with_user("jane", &["admin", "user"]);
        let out = expand(
            "owner = '%user%' AND grp IN('%groups%')",
            &ctx,
            &DataConfig::default(),
        );
        assert_eq!(out, "owner = 'jane' AND grp IN('admin','user')");
    }

    #[test]
    fn missing_values_expand_to_empty() {
        let ctx = FixedContext::default();
        assert_eq!(expand("[%user%][%groups%]", &ctx, &DataConfig::default()), "[][]");
    }

    #[test]
    fn now_is_iso_date() {
        let ctx = FixedContext::default();
        assert_eq!(expand("due < '%now%'", &ctx, &DataConfig::default()), "due < '2024-03-05'");
    }

    #[test]
    fn lang_prefers_pre_translation_setting() {
        let ctx = FixedContext::default().with_lang("de");
        assert_eq!(expand("%lang%", &ctx, &DataConfig::default()), "de");

        let config = DataConfig {
            lang_before_translation: Some("en".into()),
            ..Default::default()
        };
        assert_eq!(expand("%lang%", &ctx, &config), "en");
    }

    #[test]
    fn trans_depends_on_translation_scheme() {
        let config = DataConfig::default();

        let ctx = FixedContext::default().with_lang("de");
        assert_eq!(expand("[%trans%]", &ctx, &config), "[]");

        let ctx = FixedContext::default()
            .with_lang("de")
            .with_variant(Some(""));
        assert_eq!(expand("%trans%", &ctx, &config), "de");

        let ctx = FixedContext::default()
            .with_lang("de")
            .with_variant(Some("fr"));
        assert_eq!(expand("%trans%", &ctx, &config), "fr");
    }

    #[test]
    fn expanded_values_are_not_expanded_again() {
        let ctx = FixedContext::default().with_user("%now%", &["%lang%"]);
        assert_eq!(
            expand("%user% %groups% %now%", &ctx, &DataConfig::default()),
            "%now% %lang% 2024-03-05"
        );
    }

    #[test]
    fn text_without_placeholders_is_untouched() {
        let ctx = FixedContext::default().with_user("jane", &[]);
        assert_eq!(expand("plain user", &ctx, &DataConfig::default()), "plain user");
    }
}
