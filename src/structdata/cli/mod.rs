//! Command handlers. Each one calls into [`DataApi`] and prints the result;
//! nothing here knows how columns or filters work.

pub mod html;

use html::{CliContext, HtmlRenderer};
use serde::Serialize;
use structdata::api::DataApi;
use structdata::error::Result;
use structdata::model::{BaseType, ColumnType, Predicate};
use structdata::store::BackingStore;

#[derive(Serialize)]
struct FilterOutput<'a> {
    #[serde(flatten)]
    predicate: &'a Predicate,
    sql: String,
}

pub fn handle_column<S: BackingStore>(api: &DataApi<S>, token: &str) -> Result<()> {
    let column = api.column(token);
    println!("{}", serde_json::to_string_pretty(&column)?);
    Ok(())
}

/// Prints the cleaned value; an empty line means the value was rejected.
pub fn handle_clean<S: BackingStore>(api: &DataApi<S>, type_tag: &str, value: &str) -> Result<()> {
    let tag = type_tag.to_lowercase();
    let column_type = match api.aliases().get(&tag) {
        Some(alias) => ColumnType::Alias(alias.clone()),
        None => ColumnType::Base(BaseType::from_tag(&tag)),
    };
    println!("{}", api.clean(value, &column_type));
    Ok(())
}

/// Prints the parsed predicates. Returns whether at least one line parsed.
pub fn handle_filter<S: BackingStore>(api: &DataApi<S>, lines: &[String]) -> Result<bool> {
    let set = api.parse_filters(lines);
    for error in &set.errors {
        eprintln!("Error: {}", error);
    }

    let output: Vec<FilterOutput> = set
        .predicates
        .iter()
        .map(|predicate| FilterOutput {
            predicate,
            sql: predicate.sql_condition(&predicate.key),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(!set.is_empty())
}

pub fn handle_format<S: BackingStore>(
    api: &DataApi<S>,
    ctx: &mut CliContext,
    column: &str,
    value: &str,
) -> Result<()> {
    let column = api.column(column);
    println!("{}", api.format(&column, value, &HtmlRenderer, ctx));
    Ok(())
}
