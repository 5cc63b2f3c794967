//! Core data types: column types, column descriptors and predicates.
//!
//! A column's type is a closed set of [`BaseType`] kinds. Type aliases wrap a
//! base type together with optional prefix, postfix and enum constraints; see
//! [`ColumnType`]. Unknown type tags are not errors, they end up in
//! [`BaseType::Other`] and take the plain-text path everywhere.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// The kind of value a column holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    /// Link to a page, the value is the page id (`page`)
    Page,
    /// Link with explicit title: `id|title` (`title`)
    Title,
    /// Link whose id may be carried over from an earlier entry (`pageid`)
    PageId,
    /// Page inside the namespace named after the column (`nspage`)
    NsPage,
    /// Mail address with optional display name (`mail`)
    Mail,
    /// External link (`url`)
    Url,
    /// Tag linking back to a filtered listing (`tag`)
    Tag,
    /// Unix timestamp (`timestamp`)
    Timestamp,
    /// Inline wiki markup (`wiki`)
    Wiki,
    /// Calendar date `YYYY-MM-DD` (`dt`)
    Date,
    /// Image, optionally with a width in pixels (`img`, `img300`)
    Image { width: Option<u32> },
    /// Anything else, including the empty tag
    Other(String),
}

impl BaseType {
    /// Resolve a lower-cased type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "page" => BaseType::Page,
            "title" => BaseType::Title,
            "pageid" => BaseType::PageId,
            "nspage" => BaseType::NsPage,
            "mail" => BaseType::Mail,
            "url" => BaseType::Url,
            "tag" => BaseType::Tag,
            "timestamp" => BaseType::Timestamp,
            "wiki" => BaseType::Wiki,
            "dt" => BaseType::Date,
            _ => match tag.strip_prefix("img") {
                Some(rest) => BaseType::Image {
                    width: leading_number(rest).filter(|w| *w > 0),
                },
                None => BaseType::Other(tag.to_string()),
            },
        }
    }

    /// The type tag as written in column names.
    pub fn tag(&self) -> Cow<'_, str> {
        match self {
            BaseType::Page => "page".into(),
            BaseType::Title => "title".into(),
            BaseType::PageId => "pageid".into(),
            BaseType::NsPage => "nspage".into(),
            BaseType::Mail => "mail".into(),
            BaseType::Url => "url".into(),
            BaseType::Tag => "tag".into(),
            BaseType::Timestamp => "timestamp".into(),
            BaseType::Wiki => "wiki".into(),
            BaseType::Date => "dt".into(),
            BaseType::Image { width: Some(w) } => format!("img{}", w).into(),
            BaseType::Image { width: None } => "img".into(),
            BaseType::Other(tag) => Cow::Borrowed(tag.as_str()),
        }
    }
}

/// Parses the digits at the start of `s`, like a lenient integer cast.
fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

impl Serialize for BaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// A base type reached through a user-defined alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasType {
    /// Alias name as used in column tokens
    pub name: String,
    #[serde(rename = "type")]
    pub base: BaseType,
    /// Comma separated list of allowed values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
}

/// The resolved type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnType {
    Base(BaseType),
    Alias(AliasType),
}

impl ColumnType {
    /// The base type, with any alias wrapper stripped.
    pub fn base(&self) -> &BaseType {
        match self {
            ColumnType::Base(base) => base,
            ColumnType::Alias(alias) => &alias.base,
        }
    }

    pub fn alias(&self) -> Option<&AliasType> {
        match self {
            ColumnType::Alias(alias) => Some(alias),
            ColumnType::Base(_) => None,
        }
    }

    pub fn enumeration(&self) -> Option<&str> {
        self.alias().and_then(|a| a.enumeration.as_deref())
    }

    pub fn prefix(&self) -> &str {
        self.alias().and_then(|a| a.prefix.as_deref()).unwrap_or("")
    }

    pub fn postfix(&self) -> &str {
        self.alias().and_then(|a| a.postfix.as_deref()).unwrap_or("")
    }
}

impl From<BaseType> for ColumnType {
    fn from(base: BaseType) -> Self {
        ColumnType::Base(base)
    }
}

/// Parsed metadata for one named column.
///
/// Built by [`crate::column::parse_column`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// The raw token as given (e.g. `Tags_pages`)
    pub colname: String,
    /// Lower-cased key used for storage and lookup
    pub key: String,
    /// Key with its original casing
    pub original_key: String,
    /// Display label
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Alias name when the type came from the alias table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_type: Option<String>,
    /// Whether the stored value may hold several newline separated entries
    pub multi: bool,
}

/// Normalized comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
    In,
}

impl Comparator {
    /// The operator as it is embedded in query text.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Like => "LIKE",
            Comparator::NotLike => "NOT LIKE",
            Comparator::In => "IN(",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl Serialize for Comparator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_sql())
    }
}

/// One normalized filter condition.
///
/// `value` is already quoted by the backing store. For [`Comparator::In`] it is
/// the comma joined list of quoted elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub key: String,
    pub colname: String,
    pub comparator: Comparator,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub value: String,
}

impl Predicate {
    /// Render the condition against a column expression chosen by the caller.
    pub fn sql_condition(&self, column_expr: &str) -> String {
        match self.comparator {
            Comparator::In => format!("{} IN({})", column_expr, self.value),
            op => format!("{} {} {}", column_expr, op, self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_resolve() {
        assert_eq!(BaseType::from_tag("page"), BaseType::Page);
        assert_eq!(BaseType::from_tag("pageid"), BaseType::PageId);
        assert_eq!(BaseType::from_tag("dt"), BaseType::Date);
        assert_eq!(BaseType::from_tag("wiki"), BaseType::Wiki);
    }

    #[test]
    fn image_tags_carry_width() {
        assert_eq!(
            BaseType::from_tag("img300"),
            BaseType::Image { width: Some(300) }
        );
        assert_eq!(BaseType::from_tag("img"), BaseType::Image { width: None });
        assert_eq!(BaseType::from_tag("img0"), BaseType::Image { width: None });
        assert_eq!(BaseType::from_tag("imgx"), BaseType::Image { width: None });
    }

    #[test]
    fn unknown_tags_pass_through() {
        assert_eq!(BaseType::from_tag(""), BaseType::Other(String::new()));
        assert_eq!(
            BaseType::from_tag("decimal"),
            BaseType::Other("decimal".into())
        );
        assert_eq!(BaseType::from_tag("decimal").tag(), "decimal");
    }

    #[test]
    fn alias_accessors() {
        let ty = ColumnType::Alias(AliasType {
            name: "state".into(),
            base: BaseType::Other(String::new()),
            enumeration: Some("open, closed".into()),
            prefix: Some("x".into()),
            postfix: None,
        });
        assert_eq!(ty.enumeration(), Some("open, closed"));
        assert_eq!(ty.prefix(), "x");
        assert_eq!(ty.postfix(), "");

        let plain = ColumnType::from(BaseType::Url);
        assert_eq!(plain.base(), &BaseType::Url);
        assert!(plain.enumeration().is_none());
    }

    #[test]
    fn predicate_sql_condition() {
        let pred = Predicate {
            key: "tag".into(),
            colname: "tags".into(),
            comparator: Comparator::In,
            column_type: BaseType::Other(String::new()).into(),
            value: "'a','b'".into(),
        };
        assert_eq!(pred.sql_condition("T1.value"), "T1.value IN('a','b')");

        let like = Predicate {
            comparator: Comparator::NotLike,
            value: "'%x%'".into(),
            ..pred
        };
        assert_eq!(like.sql_condition("T1.value"), "T1.value NOT LIKE '%x%'");
    }
}
