//! # Filter Lines
//!
//! A filter line compares one column against a value: `key<comparator>value`.
//! The line is split at the first run of one or two characters from
//! `* = < > ! ~`; everything before it is the column token, everything after
//! it the value. A column token containing one of those characters therefore
//! splits early; that is part of the grammar.
//!
//! ## Comparators
//!
//! | Written | Means |
//! |---------|-------|
//! | `=`, `==` | equal |
//! | `!=`, `<>`, `=!` | not equal |
//! | `<`, `<=`, `>`, `>=` | ordering |
//! | `~`, `~=`, `=~` | `LIKE`, `*` is a wildcard |
//! | `!~`, `~!` | `NOT LIKE`, `*` is a wildcard |
//! | `*~` | contains: `LIKE '%value%'` |
//! | `~~` | `IN(...)`, the value is a comma separated list |
//!
//! Values of non-`LIKE` comparisons are cleaned for the column type first, see
//! [`crate::clean`]. Every value is quoted by the backing store.
//!
//! Lines that cannot be parsed produce a [`FilterError`]; [`FilterParser::parse_all`]
//! keeps going with the remaining lines. Predicates are AND-combined by the
//! query engine; there is no OR and no grouping.

use crate::aliases::AliasTable;
use crate::clean::clean_value;
use crate::column::parse_column;
use crate::context::ListingState;
use crate::error::FilterError;
use crate::ids::IdNormalizer;
use crate::locale::Translations;
use crate::model::{Comparator, Predicate};
use crate::store::BackingStore;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Request parameter carrying the active filter lines.
pub const FILTER_PARAM: &str = "dataflt";
pub const SORT_PARAM: &str = "datasrt";
pub const OFFSET_PARAM: &str = "dataofs";

/// Characters left alone by raw URL encoding.
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn is_comparator_char(b: u8) -> bool {
    matches!(b, b'*' | b'=' | b'<' | b'>' | b'!' | b'~')
}

/// Split a line into column token, raw comparator and value.
fn split_line(line: &str) -> Option<(&str, &str, &str)> {
    let bytes = line.as_bytes();
    let start = bytes.iter().position(|b| is_comparator_char(*b))?;
    let mut end = start + 1;
    if end < bytes.len() && is_comparator_char(bytes[end]) {
        end += 1;
    }
    Some((&line[..start], &line[start..end], &line[end..]))
}

/// Comparator after alias substitution, before wildcard handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawComparator {
    Plain(Comparator),
    Like,
    NotLike,
    Contains,
}

fn normalize_comparator(raw: &str) -> Option<RawComparator> {
    let canonical = match raw {
        "<>" | "=!" => "!=",
        "~!" => "!~",
        "==" => "=",
        "~=" | "=~" => "~",
        "~~" => "IN(",
        other => other,
    };
    let op = match canonical {
        "=" => RawComparator::Plain(Comparator::Eq),
        "!=" => RawComparator::Plain(Comparator::Ne),
        "<" => RawComparator::Plain(Comparator::Lt),
        "<=" => RawComparator::Plain(Comparator::Le),
        ">" => RawComparator::Plain(Comparator::Gt),
        ">=" => RawComparator::Plain(Comparator::Ge),
        "IN(" => RawComparator::Plain(Comparator::In),
        "~" => RawComparator::Like,
        "!~" => RawComparator::NotLike,
        "*~" => RawComparator::Contains,
        _ => return None,
    };
    Some(op)
}

/// Outcome of parsing several independent filter lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Successfully parsed predicates, in input order
    pub predicates: Vec<Predicate>,
    /// One entry per rejected line
    pub errors: Vec<FilterError>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Turns filter lines into predicates.
pub struct FilterParser<'a, S: ?Sized, N: ?Sized> {
    aliases: &'a AliasTable,
    translations: &'a Translations,
    store: &'a S,
    ids: &'a N,
}

impl<'a, S, N> FilterParser<'a, S, N>
where
    S: BackingStore + ?Sized,
    N: IdNormalizer + ?Sized,
{
    pub fn new(
        aliases: &'a AliasTable,
        translations: &'a Translations,
        store: &'a S,
        ids: &'a N,
    ) -> Self {
        Self {
            aliases,
            translations,
            store,
            ids,
        }
    }

    /// Parse a single filter line.
    pub fn parse(&self, line: &str) -> Result<Predicate, FilterError> {
        let (lhs, raw_op, rhs) =
            split_line(line).ok_or_else(|| FilterError::Unparsable(line.to_string()))?;
        let column = parse_column(lhs.trim(), self.aliases, self.translations);
        let op = normalize_comparator(raw_op)
            .ok_or_else(|| FilterError::Comparator(raw_op.to_string()))?;
        let rhs = rhs.trim();

        let (comparator, value) = match op {
            RawComparator::Plain(comparator) => (
                comparator,
                clean_value(rhs, &column.column_type, self.ids),
            ),
            RawComparator::Like => (Comparator::Like, rhs.replace('*', "%")),
            RawComparator::NotLike => (Comparator::NotLike, rhs.replace('*', "%")),
            RawComparator::Contains => (Comparator::Like, format!("%{}%", rhs.replace('*', "%"))),
        };

        let value = match comparator {
            Comparator::In => value
                .split(',')
                .map(|item| self.store.quote_literal(item.trim()))
                .collect::<Vec<_>>()
                .join(","),
            _ => self.store.quote_literal(&value),
        };

        Ok(Predicate {
            key: column.key,
            colname: column.colname,
            comparator,
            column_type: column.column_type,
            value,
        })
    }

    /// Parse independent lines; failures are collected, not fatal.
    pub fn parse_all<I, L>(&self, lines: I) -> FilterSet
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut set = FilterSet::default();
        for line in lines {
            match self.parse(line.as_ref()) {
                Ok(predicate) => set.predicates.push(predicate),
                Err(e) => {
                    log::debug!("skipping filter line: {}", e);
                    set.errors.push(e);
                }
            }
        }
        set
    }
}

/// Query parameters for "show the listing filtered by this tag".
///
/// Active filters on the same column are dropped, the others keep their
/// position, and the new filter is appended after the last original position.
/// Sort and offset of the listing are carried along.
pub fn tag_filter_params(colname: &str, tag: &str, listing: &ListingState) -> Vec<(String, String)> {
    let same_column = format!("{}=", colname);
    let mut params: Vec<(String, String)> = listing
        .filters
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.starts_with(&same_column))
        .map(|(i, line)| (format!("{}[{}]", FILTER_PARAM, i), line.clone()))
        .collect();
    params.push((
        format!("{}[{}]", FILTER_PARAM, listing.filters.len()),
        format!("{}{}", same_column, tag),
    ));

    if let Some(sort) = &listing.sort {
        params.push((SORT_PARAM.to_string(), sort.clone()));
    }
    if let Some(offset) = listing.offset {
        params.push((OFFSET_PARAM.to_string(), offset.to_string()));
    }
    params
}

/// Raw URL encoding (RFC 3986 unreserved characters stay as they are).
pub fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, URL_SAFE).to_string()
}

/// Encode parameters as a query string.
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{}={}", url_encode(name), url_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
