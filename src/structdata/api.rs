//! # API Facade
//!
//! [`DataApi`] is the single entry point for hosts. It owns the backing store,
//! the lazily loaded alias table, the translations and the configuration, and
//! dispatches to the core modules:
//!
//! - [`crate::column`] for column tokens
//! - [`crate::clean`] for input validation
//! - [`crate::filter`] for filter lines
//! - [`crate::placeholders`] for `%user%` and friends
//! - [`crate::format`] for display formatting
//!
//! The facade does no I/O of its own besides the one alias read, and returns
//! data or markup strings; printing is the caller's business.
//!
//! `DataApi<S: BackingStore>` is generic over the store, so tests run against
//! [`crate::store::memory::InMemoryStore`].

use crate::aliases::{AliasRegistry, AliasTable};
use crate::clean::clean_value;
use crate::column::parse_column;
use crate::config::DataConfig;
use crate::context::PageContext;
use crate::error::FilterError;
use crate::filter::{FilterParser, FilterSet};
use crate::format::ValueFormatter;
use crate::ids::{IdNormalizer, WikiIds};
use crate::locale::{Localizer, Translations};
use crate::model::{ColumnDescriptor, ColumnType, Predicate};
use crate::placeholders;
use crate::render::Renderer;
use crate::store::BackingStore;

pub struct DataApi<S: BackingStore> {
    store: S,
    aliases: AliasRegistry,
    translations: Translations,
    config: DataConfig,
    ids: Box<dyn IdNormalizer>,
}

impl<S: BackingStore> DataApi<S> {
    pub fn new(store: S, config: DataConfig) -> Self {
        Self {
            store,
            aliases: AliasRegistry::new(),
            translations: Translations::default(),
            config,
            ids: Box::new(WikiIds),
        }
    }

    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    /// Load UI strings and column labels for `lang`.
    pub fn load_translations<L: Localizer + ?Sized>(mut self, localizer: &L, lang: &str) -> Self {
        self.translations = Translations::load(localizer, lang);
        self
    }

    pub fn with_id_normalizer(mut self, ids: Box<dyn IdNormalizer>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The alias table, read from the store on first use.
    pub fn aliases(&self) -> &AliasTable {
        self.aliases.table(&self.store)
    }

    /// Parse a column token.
    pub fn column(&self, token: &str) -> ColumnDescriptor {
        parse_column(token, self.aliases(), &self.translations)
    }

    /// Validate a value for a column type; empty means rejected.
    pub fn clean(&self, raw: &str, column_type: &ColumnType) -> String {
        clean_value(raw, column_type, self.ids.as_ref())
    }

    /// Validate a value for the type of the column named by `token`.
    pub fn clean_for_column(&self, raw: &str, token: &str) -> String {
        self.clean(raw, &self.column(token).column_type)
    }

    pub fn parse_filter(&self, line: &str) -> Result<Predicate, FilterError> {
        self.filter_parser().parse(line)
    }

    pub fn parse_filters<I, L>(&self, lines: I) -> FilterSet
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        self.filter_parser().parse_all(lines)
    }

    /// Substitute placeholders in query text.
    pub fn expand<C: PageContext + ?Sized>(&self, text: &str, ctx: &C) -> String {
        placeholders::expand(text, ctx, &self.config)
    }

    /// Format a stored value of `column` for display.
    pub fn format<R, C>(&self, column: &ColumnDescriptor, stored: &str, renderer: &R, ctx: &mut C) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext,
    {
        self.formatter().format(column, stored, renderer, ctx)
    }

    /// The value `LIKE` patterns match against for the column named `colname`.
    pub fn resolve_data<R, C>(&self, value: &str, colname: &str, renderer: &R, ctx: &C) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext + ?Sized,
    {
        let column = self.column(colname);
        self.formatter().resolve_data(&column, value, renderer, ctx)
    }

    fn filter_parser(&self) -> FilterParser<'_, S, dyn IdNormalizer> {
        FilterParser::new(self.aliases(), &self.translations, &self.store, self.ids.as_ref())
    }

    fn formatter(&self) -> ValueFormatter<'_, dyn IdNormalizer> {
        ValueFormatter::new(&self.config, &self.translations, self.ids.as_ref())
    }
}
