//! Column token parsing.
//!
//! A column name carries its own type: `key[_type][s]`.
//!
//! | Token | key | type | multi |
//! |-------|-----|------|-------|
//! | `name` | `name` | | no |
//! | `tags` | `tag` | | yes |
//! | `address` | `address` | | no |
//! | `Birthday_dt` | `birthday` | `dt` | no |
//! | `authors_pages` | `authors` | `page` | yes |
//!
//! A trailing `s` marks a multi-valued column unless it directly follows
//! another `s`. The key ends at the first underscore. Parsing never fails:
//! unknown types fall through to plain text.
//!
//! After the split, reserved keys (`%title%`, `%pageid%`, `%class%`,
//! `%lastmod%`) get their fixed title and default type, the type is resolved
//! through the alias table, and a localized label replaces the title when one
//! exists for the key.

use crate::aliases::AliasTable;
use crate::locale::Translations;
use crate::model::{BaseType, ColumnDescriptor, ColumnType};

/// Reserved column names: (name, title string key, default type).
const SPECIAL_COLUMNS: &[(&str, &str, Option<&str>)] = &[
    ("%title%", "page", Some("title")),
    ("%pageid%", "title", Some("page")),
    ("%class%", "class", None),
    ("%lastmod%", "lastmod", Some("timestamp")),
];

/// The pieces of a column token before any lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenParts<'a> {
    key: &'a str,
    type_tag: &'a str,
    multi: bool,
}

fn split_token(token: &str) -> TokenParts<'_> {
    let bytes = token.as_bytes();
    let multi = bytes.last() == Some(&b's') && (bytes.len() < 2 || bytes[bytes.len() - 2] != b's');
    let body = if multi {
        &token[..token.len() - 1]
    } else {
        token
    };
    let (key, type_tag) = body.split_once('_').unwrap_or((body, ""));
    TokenParts {
        key,
        type_tag,
        multi,
    }
}

/// Parse a raw column token into a descriptor.
pub fn parse_column(
    token: &str,
    aliases: &AliasTable,
    translations: &Translations,
) -> ColumnDescriptor {
    let parts = split_token(token);
    let key = parts.key.to_lowercase();
    let mut title = parts.key.to_string();
    let mut type_tag = parts.type_tag.to_lowercase();

    if let Some((_, title_key, default_type)) = SPECIAL_COLUMNS
        .iter()
        .find(|(name, _, _)| *name == parts.key)
    {
        title = translations.ui(title_key).to_string();
        match default_type {
            Some(default_type) if type_tag.is_empty() => type_tag = default_type.to_string(),
            _ => {}
        }
    }

    let (column_type, orig_type) = match aliases.get(&type_tag) {
        Some(alias) => (ColumnType::Alias(alias.clone()), Some(type_tag)),
        None => (ColumnType::Base(BaseType::from_tag(&type_tag)), None),
    };

    if let Some(label) = translations.label(&key) {
        title = label.to_string();
    }

    ColumnDescriptor {
        colname: token.to_string(),
        original_key: parts.key.to_string(),
        key,
        title,
        column_type,
        orig_type,
        multi: parts.multi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AliasRow;

    fn parse(token: &str) -> ColumnDescriptor {
        parse_column(token, &AliasTable::default(), &Translations::default())
    }

    #[test]
    fn plain_key_has_no_type() {
        let col = parse("Name");
        assert_eq!(col.key, "name");
        assert_eq!(col.original_key, "Name");
        assert_eq!(col.title, "Name");
        assert_eq!(col.column_type, ColumnType::Base(BaseType::Other(String::new())));
        assert!(!col.multi);
    }

    #[test]
    fn trailing_s_marks_multi() {
        let col = parse("tags");
        assert_eq!(col.key, "tag");
        assert!(col.multi);
        assert_eq!(col.colname, "tags");
    }

    #[test]
    fn double_s_is_not_a_marker() {
        let col = parse("address");
        assert_eq!(col.key, "address");
        assert!(!col.multi);

        let col = parse("group_class");
        assert_eq!(col.column_type.base(), &BaseType::Other("class".into()));
        assert!(!col.multi);
    }

    #[test]
    fn empty_token_parses() {
        let col = parse("");
        assert_eq!(col.key, "");
        assert_eq!(col.column_type.base(), &BaseType::Other(String::new()));
        assert!(!col.multi);
    }

    #[test]
    fn key_ends_at_first_underscore() {
        let col = parse("Birthday_DT");
        assert_eq!(col.key, "birthday");
        assert_eq!(col.column_type.base(), &BaseType::Date);

        let col = parse("a_b_c");
        assert_eq!(col.key, "a");
        assert_eq!(col.column_type.base(), &BaseType::Other("b_c".into()));
    }

    #[test]
    fn plural_token_matches_singular_except_multi() {
        for token in ["author_page", "home_url", "price_decimal", "photo_img300"] {
            let single = parse(token);
            let plural = parse(&format!("{}s", token));
            assert!(!single.multi);
            assert!(plural.multi);
            assert_eq!(single.key, plural.key);
            assert_eq!(single.column_type, plural.column_type);
            assert_eq!(single.title, plural.title);
        }
    }

    #[test]
    fn special_columns_get_titles_and_types() {
        let col = parse("%title%");
        assert_eq!(col.title, "Page");
        assert_eq!(col.column_type.base(), &BaseType::Title);

        let col = parse("%pageid%");
        assert_eq!(col.title, "Title");
        assert_eq!(col.column_type.base(), &BaseType::Page);

        let col = parse("%class%");
        assert_eq!(col.title, "Class");
        assert_eq!(col.column_type.base(), &BaseType::Other(String::new()));

        let col = parse("%lastmod%");
        assert_eq!(col.title, "Last modified");
        assert_eq!(col.column_type.base(), &BaseType::Timestamp);
    }

    #[test]
    fn explicit_type_wins_over_special_default() {
        let col = parse("%title%_wiki");
        assert_eq!(col.title, "Page");
        assert_eq!(col.column_type.base(), &BaseType::Wiki);
    }

    #[test]
    fn alias_types_are_resolved() {
        let aliases = AliasTable::from_rows(vec![AliasRow::new("user", "page")
            .with_prefix("people:")]);
        let col = parse_column("Authors_Users", &aliases, &Translations::default());

        assert_eq!(col.key, "authors");
        assert!(col.multi);
        assert_eq!(col.orig_type.as_deref(), Some("user"));
        assert_eq!(col.column_type.base(), &BaseType::Page);
        assert_eq!(col.column_type.prefix(), "people:");
    }

    #[test]
    fn localized_label_overrides_title() {
        let translations = Translations::default().with_label("price", "Preis");
        let col = parse_column("Price_decimal", &AliasTable::default(), &translations);
        assert_eq!(col.title, "Preis");
        assert_eq!(col.original_key, "Price");
    }
}
