//! Rendering collaborator.
//!
//! The formatter decides *what* to render (which id, which title, which
//! width); producing markup is left to a [`Renderer`] supplied by the host.
//! Every method returns a markup fragment that is emitted as is.

use crate::context::PageContext;

/// How a rendered image links to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linking {
    /// Link straight to the media file
    Direct,
    /// Link to the media details page
    Details,
    NoLink,
}

/// Parameters of an internal or external media render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub src: String,
    pub title: String,
    pub align: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub cache: Option<String>,
    pub linking: Linking,
}

/// One parsed markup instruction, as produced by the host's markup parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub args: Vec<String>,
}

impl Instruction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

pub const PARAGRAPH_OPEN: &str = "p_open";

pub trait Renderer {
    /// Link to a page of the wiki.
    fn internal_link(&self, id: &str, title: Option<&str>) -> String;

    /// Link to an outside URL.
    fn external_link(&self, url: &str, title: Option<&str>, class: &str) -> String;

    fn internal_media(&self, media: &MediaRequest) -> String;

    fn external_media(&self, media: &MediaRequest) -> String;

    /// Whether a media reference points outside the wiki.
    fn is_external_media(&self, src: &str) -> bool {
        is_external_url(src)
    }

    /// URL of a page with an already encoded query string.
    fn page_url(&self, id: &str, query: &str) -> String;

    /// First heading of a page, if the page exists and has one.
    fn first_heading(&self, id: &str) -> Option<String>;

    /// Parse markup into instructions, including the document and paragraph
    /// wrappers.
    fn instructions(&self, markup: &str) -> Vec<Instruction>;

    /// Render instructions inline in the given context.
    fn render_inline(&self, instructions: &[Instruction], ctx: &dyn PageContext) -> String;
}

/// `http://`, `https://` or `ftp://`, case-insensitive.
pub fn is_external_url(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    ["http://", "https://", "ftp://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn detects_external_urls() {
        assert!(is_external_url("http://example.com/a.png"));
        assert!(is_external_url("HTTPS://example.com/a.png"));
        assert!(is_external_url("ftp://example.com/a.png"));
        assert!(!is_external_url("wiki:a.png"));
        assert!(!is_external_url("mailto:x@y.z"));
    }
}
