//! Fakes for the collaborator traits, shared by unit tests.

use crate::context::{ListingState, PageContext};
use crate::locale::Localizer;
use crate::render::{Instruction, MediaRequest, Renderer};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;

/// A render request as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    InternalLink { id: String, title: Option<String> },
    ExternalLink { url: String, class: String },
    Media { external: bool, media: MediaRequest },
    Inline { current_id: String, instructions: Vec<Instruction> },
}

/// Renderer that records every request and emits predictable markup.
///
/// Media sources ending in `.pdf` render as `mediafile` links.
#[derive(Default)]
pub struct RecordingRenderer {
    calls: RefCell<Vec<RenderCall>>,
    headings: HashMap<String, String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heading(mut self, id: &str, heading: &str) -> Self {
        self.headings.insert(id.to_string(), heading.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: RenderCall) {
        self.calls.borrow_mut().push(call);
    }

    fn media_markup(media: &MediaRequest) -> String {
        let class = if media.src.ends_with(".pdf") {
            "mediafile"
        } else {
            "media"
        };
        format!(
            "<a href=\"{}\" class=\"{}\" title=\"{}\">{}px</a>",
            media.src,
            class,
            media.title,
            media.width.unwrap_or_default()
        )
    }
}

impl Renderer for RecordingRenderer {
    fn internal_link(&self, id: &str, title: Option<&str>) -> String {
        self.record(RenderCall::InternalLink {
            id: id.to_string(),
            title: title.map(str::to_string),
        });
        match title {
            Some(title) => format!("[[{}|{}]]", id, title),
            None => format!("[[{}]]", id),
        }
    }

    fn external_link(&self, url: &str, _title: Option<&str>, class: &str) -> String {
        self.record(RenderCall::ExternalLink {
            url: url.to_string(),
            class: class.to_string(),
        });
        format!("<a class=\"{}\" href=\"{}\">{}</a>", class, url, url)
    }

    fn internal_media(&self, media: &MediaRequest) -> String {
        self.record(RenderCall::Media {
            external: false,
            media: media.clone(),
        });
        Self::media_markup(media)
    }

    fn external_media(&self, media: &MediaRequest) -> String {
        self.record(RenderCall::Media {
            external: true,
            media: media.clone(),
        });
        Self::media_markup(media)
    }

    fn page_url(&self, id: &str, query: &str) -> String {
        if query.is_empty() {
            format!("/{}", id)
        } else {
            format!("/{}?{}", id, query)
        }
    }

    fn first_heading(&self, id: &str) -> Option<String> {
        self.headings.get(id).cloned()
    }

    /// Lines starting with `* ` parse as a list, everything else as a paragraph.
    fn instructions(&self, markup: &str) -> Vec<Instruction> {
        let (open, close) = if markup.starts_with("* ") {
            ("listu_open", "listu_close")
        } else {
            ("p_open", "p_close")
        };
        vec![
            Instruction::new("document_start"),
            Instruction::new(open),
            Instruction::new("cdata").with_arg(markup),
            Instruction::new(close),
            Instruction::new("document_end"),
        ]
    }

    fn render_inline(&self, instructions: &[Instruction], ctx: &dyn PageContext) -> String {
        self.record(RenderCall::Inline {
            current_id: ctx.current_id(),
            instructions: instructions.to_vec(),
        });
        instructions
            .iter()
            .map(|i| match i.name.as_str() {
                "cdata" => i.args.join(""),
                other => format!("<{}>", other),
            })
            .collect()
    }
}

/// Context with fixed values, settable through builder methods.
#[derive(Debug, Clone)]
pub struct FixedContext {
    pub user: String,
    pub groups: Vec<String>,
    pub id: String,
    pub lang: String,
    pub variant: Option<String>,
    pub today: NaiveDate,
    pub listing: ListingState,
}

impl Default for FixedContext {
    fn default() -> Self {
        Self {
            user: String::new(),
            groups: Vec::new(),
            id: String::new(),
            lang: "en".to_string(),
            variant: None,
            today: NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"),
            listing: ListingState::default(),
        }
    }
}

impl FixedContext {
    pub fn with_user(mut self, user: &str, groups: &[&str]) -> Self {
        self.user = user.to_string();
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn with_variant(mut self, variant: Option<&str>) -> Self {
        self.variant = variant.map(str::to_string);
        self
    }

    pub fn with_listing(mut self, listing: ListingState) -> Self {
        self.listing = listing;
        self
    }
}

impl PageContext for FixedContext {
    fn user(&self) -> String {
        self.user.clone()
    }

    fn groups(&self) -> Vec<String> {
        self.groups.clone()
    }

    fn current_id(&self) -> String {
        self.id.clone()
    }

    fn set_current_id(&mut self, id: String) {
        self.id = id;
    }

    fn lang(&self) -> String {
        self.lang.clone()
    }

    fn translation_variant(&self) -> Option<String> {
        self.variant.clone()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }

    fn listing(&self) -> ListingState {
        self.listing.clone()
    }
}

type LangTable = HashMap<Option<String>, HashMap<String, String>>;

/// Localizer backed by in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct TableLocalizer {
    ui: LangTable,
    labels: LangTable,
}

impl TableLocalizer {
    pub fn ui(mut self, lang: Option<&str>, key: &str, value: &str) -> Self {
        self.ui
            .entry(lang.map(str::to_string))
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn label(mut self, lang: Option<&str>, key: &str, value: &str) -> Self {
        self.labels
            .entry(lang.map(str::to_string))
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl Localizer for TableLocalizer {
    fn ui_strings(&self, lang: Option<&str>) -> HashMap<String, String> {
        self.ui
            .get(&lang.map(str::to_string))
            .cloned()
            .unwrap_or_default()
    }

    fn column_labels(&self, lang: Option<&str>) -> HashMap<String, String> {
        self.labels
            .get(&lang.map(str::to_string))
            .cloned()
            .unwrap_or_default()
    }
}
