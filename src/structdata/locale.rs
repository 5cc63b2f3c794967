//! Localized strings.
//!
//! Two tables are involved:
//!
//! - **UI strings**: fixed labels such as the titles of the special columns and
//!   the "filter by tag" link title. English built-ins are always present.
//! - **Column labels**: user supplied display names keyed by lower-cased column
//!   key, used to override a column's title.
//!
//! Both are loaded once, language-neutral entries first and the active
//! language's entries last, so the language wins on collisions.

use std::collections::HashMap;

/// Source of translated strings, implemented by the host.
pub trait Localizer {
    /// Fixed UI strings for `lang`, or the language-neutral set for `None`.
    fn ui_strings(&self, lang: Option<&str>) -> HashMap<String, String>;

    /// Column display labels for `lang`, or the language-neutral set for `None`.
    fn column_labels(&self, lang: Option<&str>) -> HashMap<String, String>;
}

const BUILTIN_STRINGS: &[(&str, &str)] = &[
    ("page", "Page"),
    ("title", "Title"),
    ("class", "Class"),
    ("lastmod", "Last modified"),
    ("tagfilter", "Show pages matching '%s'"),
];

/// Resolved UI strings and column labels for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    strings: HashMap<String, String>,
    labels: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            strings: BUILTIN_STRINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            labels: HashMap::new(),
        }
    }
}

impl Translations {
    /// Load the tables for `lang` from `localizer`.
    pub fn load<L: Localizer + ?Sized>(localizer: &L, lang: &str) -> Self {
        let mut translations = Self::default();
        for source in [None, Some(lang)] {
            translations.strings.extend(localizer.ui_strings(source));
            translations.labels.extend(
                localizer
                    .column_labels(source)
                    .into_iter()
                    .map(|(k, v)| (k.to_lowercase(), v)),
            );
        }
        translations
    }

    pub fn with_label(mut self, key: &str, label: impl Into<String>) -> Self {
        self.labels.insert(key.to_lowercase(), label.into());
        self
    }

    /// A UI string, falling back to the key itself when unknown.
    pub fn ui<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    /// The display label for a lower-cased column key, if one is defined.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TableLocalizer;

    #[test]
    fn builtins_are_present() {
        let t = Translations::default();
        assert_eq!(t.ui("page"), "Page");
        assert_eq!(t.ui("tagfilter"), "Show pages matching '%s'");
        assert_eq!(t.ui("nope"), "nope");
        assert!(t.label("anything").is_none());
    }

    #[test]
    fn language_entries_override_defaults() {
        let localizer = TableLocalizer::default()
            .ui(None, "page", "Page (neutral)")
            .ui(Some("de"), "page", "Seite")
            .label(None, "Price", "Price")
            .label(Some("de"), "price", "Preis")
            .label(None, "size", "Size");

        let t = Translations::load(&localizer, "de");
        assert_eq!(t.ui("page"), "Seite");
        assert_eq!(t.ui("class"), "Class");
        assert_eq!(t.label("price"), Some("Preis"));
        assert_eq!(t.label("size"), Some("Size"));
    }

    #[test]
    fn other_languages_are_ignored() {
        let localizer = TableLocalizer::default().label(Some("fr"), "price", "Prix");
        let t = Translations::load(&localizer, "de");
        assert!(t.label("price").is_none());
    }
}
