//! # Value Formatting
//!
//! Stored values are turned into display markup according to their column's
//! type. A stored value may hold several entries separated by newlines; each
//! non-blank entry is formatted on its own and the fragments are joined with
//! `", "`.
//!
//! ## Types
//!
//! | Type | Entry | Output |
//! |------|-------|--------|
//! | `page` | `id` | internal link to `:id` |
//! | `title` | `id\|title` | internal link to `:id` with title |
//! | `pageid` | `id\|title` or `title` | internal link, id carried from earlier entries |
//! | `nspage` | `name` | internal link to `:<key>:name` |
//! | `mail` | `address name` | obfuscated `mailto:` link |
//! | `url` | `url` | external link |
//! | `tag` | `tag` | link to the listing filtered by the tag |
//! | `timestamp` | unix seconds | formatted date and time |
//! | `wiki` | `id\|markup` or `markup` | inline rendered markup |
//! | `img`, `img<width>` | `media\|title` | image |
//! | anything else | text | escaped text |
//!
//! Alias prefixes and postfixes are applied before rendering (never for
//! `nspage`), and may contain placeholders, see [`crate::placeholders`].
//!
//! ## Carried Ids
//!
//! For `pageid` and `wiki`, only the first entry of a multi-valued field needs
//! to name the target: an entry written as `id|...` sets the carried id, and a
//! later entry without an id reuses it.

use crate::config::{DataConfig, MailGuard};
use crate::context::{PageContext, ScopedId};
use crate::filter::{encode_query, tag_filter_params, url_encode};
use crate::ids::IdNormalizer;
use crate::locale::Translations;
use crate::model::{BaseType, ColumnDescriptor, ColumnType};
use crate::placeholders::expand;
use crate::render::{escape_html, Instruction, Linking, MediaRequest, Renderer, PARAGRAPH_OPEN};
use chrono::{Local, TimeZone};
use std::fmt::Write;

/// Formats stored values for display.
pub struct ValueFormatter<'a, N: ?Sized> {
    config: &'a DataConfig,
    translations: &'a Translations,
    ids: &'a N,
}

/// Split `entry` at the first `separator`, treating an empty right side as
/// absent.
fn split_entry(entry: &str, separator: char) -> (&str, Option<&str>) {
    match entry.split_once(separator) {
        Some((left, right)) if !right.is_empty() => (left, Some(right)),
        Some((left, _)) => (left, None),
        None => (entry, None),
    }
}

fn absolute_id(id: String) -> String {
    if id.starts_with(':') {
        id
    } else {
        format!(":{}", id)
    }
}

/// File name part of a media id.
fn media_basename(id: &str) -> &str {
    let is_separator = |c: char| c == '/' || c == ':';
    id.trim_end_matches(is_separator)
        .rsplit(is_separator)
        .next()
        .unwrap_or(id)
}

/// Disguise a mail address according to the configured guard.
pub fn obfuscate(address: &str, guard: MailGuard) -> String {
    match guard {
        MailGuard::Visible => address
            .replace('@', " [at] ")
            .replace('.', " [dot] ")
            .replace('-', " [dash] "),
        MailGuard::Hex => address.bytes().map(|b| format!("&#x{:02x};", b)).collect(),
        MailGuard::None => address.to_string(),
    }
}

/// Drop the document wrapper, and the paragraph wrapper right inside it.
fn strip_wrappers(instructions: &[Instruction]) -> &[Instruction] {
    let wraps = match instructions.get(1) {
        Some(i) if i.name == PARAGRAPH_OPEN => 2,
        _ => 1,
    };
    if instructions.len() < wraps * 2 {
        return &[];
    }
    &instructions[wraps..instructions.len() - wraps]
}

impl<'a, N: IdNormalizer + ?Sized> ValueFormatter<'a, N> {
    pub fn new(config: &'a DataConfig, translations: &'a Translations, ids: &'a N) -> Self {
        Self {
            config,
            translations,
            ids,
        }
    }

    /// Wrap `value` in the alias prefix and postfix, then expand placeholders.
    pub fn add_pre_post_fixes<C: PageContext + ?Sized>(
        &self,
        column_type: &ColumnType,
        value: &str,
        ctx: &C,
    ) -> String {
        let wrapped = format!("{}{}{}", column_type.prefix(), value, column_type.postfix());
        expand(&wrapped, ctx, self.config)
    }

    /// Prefixed, placeholder-expanded and canonicalized page id.
    fn page_id<C: PageContext + ?Sized>(&self, ty: &ColumnType, id: &str, ctx: &C) -> String {
        self.ids.clean_id(&self.add_pre_post_fixes(ty, id, ctx))
    }

    /// Format a stored value, which may hold several newline separated entries.
    pub fn format<R, C>(
        &self,
        column: &ColumnDescriptor,
        stored: &str,
        renderer: &R,
        ctx: &mut C,
    ) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext,
    {
        let mut carried = String::new();
        stored
            .split('\n')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| self.format_entry(column, entry, &mut carried, renderer, &mut *ctx))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_entry<R, C>(
        &self,
        column: &ColumnDescriptor,
        entry: &str,
        carried: &mut String,
        renderer: &R,
        ctx: &mut C,
    ) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext,
    {
        let ty = &column.column_type;
        match ty.base() {
            BaseType::Page => {
                let id = self.page_id(ty, entry, &*ctx);
                renderer.internal_link(&absolute_id(id), None)
            }
            BaseType::Title => {
                let (id, title) = split_entry(entry, '|');
                let id = self.page_id(ty, id, &*ctx);
                renderer.internal_link(&absolute_id(id), title)
            }
            BaseType::PageId => {
                let (id, title) = split_entry(entry, '|');
                let (id, title) = match title {
                    Some(title) => {
                        *carried = id.to_string();
                        (id, title)
                    }
                    None if !carried.is_empty() => (carried.as_str(), id),
                    None => (id, id),
                };
                let id = self.page_id(ty, id, &*ctx);
                renderer.internal_link(&id, Some(title))
            }
            BaseType::NsPage => {
                let id = format!(":{}:{}", column.key, entry);
                renderer.internal_link(&id, None)
            }
            BaseType::Mail => self.format_mail(ty, entry, &*ctx),
            BaseType::Url => {
                let url = self.add_pre_post_fixes(ty, entry, &*ctx);
                renderer.external_link(&url, None, "urlextern")
            }
            BaseType::Tag => self.format_tag(column, entry, renderer, &*ctx),
            BaseType::Timestamp => self.format_timestamp(entry),
            BaseType::Wiki => self.format_wiki(ty, entry, carried, renderer, ctx),
            BaseType::Image { width } => {
                let width = width.unwrap_or(self.config.image_width);
                self.format_image(column, entry, width, renderer, &*ctx)
            }
            BaseType::Date | BaseType::Other(_) => {
                escape_html(&self.add_pre_post_fixes(ty, entry, &*ctx))
            }
        }
    }

    fn format_mail<C: PageContext + ?Sized>(&self, ty: &ColumnType, entry: &str, ctx: &C) -> String {
        let (address, title) = split_entry(entry, ' ');
        let address = self.add_pre_post_fixes(ty, address, ctx);
        let mut address = obfuscate(&escape_html(&address), self.config.mailguard);
        let title = match title {
            Some(title) => escape_html(title),
            None => address.clone(),
        };
        if self.config.mailguard == MailGuard::Visible {
            address = url_encode(&address);
        }
        format!(
            "<a href=\"mailto:{}\" class=\"mail\" title=\"{}\">{}</a>",
            address, address, title
        )
    }

    fn format_tag<R, C>(&self, column: &ColumnDescriptor, tag: &str, renderer: &R, ctx: &C) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext + ?Sized,
    {
        let target = match &column.column_type {
            ColumnType::Alias(_) => self.add_pre_post_fixes(&column.column_type, "", ctx),
            ColumnType::Base(_) => format!("{}:", column.key),
        };
        let target = self.ids.clean_id(&target).replace('/', ":");
        let params = tag_filter_params(&column.colname, tag, &ctx.listing());
        let url = renderer.page_url(&target, &encode_query(&params));
        let title = self.translations.ui("tagfilter").replace("%s", tag);
        format!(
            "<a href=\"{}\" title=\"{}\" class=\"wikilink1\">{}</a>",
            escape_html(&url),
            escape_html(&title),
            escape_html(tag)
        )
    }

    /// Unix seconds in local time; anything unreadable, or a format string
    /// chrono rejects, falls back to the escaped entry.
    fn format_timestamp(&self, entry: &str) -> String {
        let Some(time) = entry
            .parse::<i64>()
            .ok()
            .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        else {
            return escape_html(entry);
        };
        let mut out = String::new();
        match write!(out, "{}", time.format(&self.config.datetime_format)) {
            Ok(()) => out,
            Err(_) => escape_html(entry),
        }
    }

    fn format_wiki<R, C>(
        &self,
        ty: &ColumnType,
        entry: &str,
        carried: &mut String,
        renderer: &R,
        ctx: &mut C,
    ) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext,
    {
        let (id, content) = split_entry(entry, '|');
        let (active_id, content) = match content {
            Some(content) => {
                *carried = id.to_string();
                (id.to_string(), content)
            }
            None => (carried.clone(), id),
        };

        let scoped = ScopedId::new(ctx, active_id);
        let content = self.add_pre_post_fixes(ty, content, &*scoped);
        let instructions = renderer.instructions(&content);
        renderer.render_inline(strip_wrappers(&instructions), &*scoped)
    }

    fn format_image<R, C>(
        &self,
        column: &ColumnDescriptor,
        entry: &str,
        width: u32,
        renderer: &R,
        ctx: &C,
    ) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext + ?Sized,
    {
        let value = self.add_pre_post_fixes(&column.column_type, entry, ctx);
        let (src, title) = match value.split_once('|') {
            Some((src, title)) => (src, title.trim().to_string()),
            None => (
                value.as_str(),
                format!("{}: {}", column.key, media_basename(&value)),
            ),
        };
        let media = MediaRequest {
            src: src.to_string(),
            title,
            align: None,
            width: Some(width),
            height: None,
            cache: None,
            linking: Linking::Direct,
        };
        let html = if renderer.is_external_media(src) {
            renderer.external_media(&media)
        } else {
            renderer.internal_media(&media)
        };
        if html.contains("mediafile") {
            html
        } else {
            html.replace("href", "rel=\"lightbox\" href")
        }
    }

    /// Value used for `LIKE` matching against a column.
    ///
    /// Applies prefix and postfix, and for `title` columns (or `page` columns
    /// when headings are used as titles) appends the target's first heading,
    /// so a pattern can match the displayed title as well as the id.
    pub fn resolve_data<R, C>(
        &self,
        column: &ColumnDescriptor,
        value: &str,
        renderer: &R,
        ctx: &C,
    ) -> String
    where
        R: Renderer + ?Sized,
        C: PageContext + ?Sized,
    {
        let value = self.add_pre_post_fixes(&column.column_type, value, ctx);
        let id = match column.column_type.base() {
            BaseType::Title => value.split('|').next().unwrap_or_default(),
            BaseType::Page if self.config.use_heading => value.as_str(),
            _ => return value,
        };
        let heading = renderer.first_heading(id).unwrap_or_default();
        format!("{} {}", value, heading)
    }
}
