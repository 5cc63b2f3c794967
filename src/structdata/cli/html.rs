//! Plain HTML rendering and a fixed page context for the command line.

use structdata::context::PageContext;
use structdata::render::{escape_html, Instruction, Linking, MediaRequest, Renderer};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

fn is_image(src: &str) -> bool {
    src.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Renders links as `/<id>` anchors, without a wiki behind it.
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn media(&self, media: &MediaRequest, href: &str) -> String {
        let title = escape_html(&media.title);
        if !is_image(&media.src) {
            return format!(
                "<a href=\"{}\" class=\"mediafile\" title=\"{}\">{}</a>",
                escape_html(href),
                title,
                title
            );
        }
        let width = media
            .width
            .map(|w| format!(" width=\"{}\"", w))
            .unwrap_or_default();
        let img = format!(
            "<img src=\"{}\" class=\"media\" alt=\"{}\"{} />",
            escape_html(href),
            title,
            width
        );
        match media.linking {
            Linking::NoLink => img,
            Linking::Direct | Linking::Details => format!(
                "<a href=\"{}\" class=\"media\" title=\"{}\">{}</a>",
                escape_html(href),
                title,
                img
            ),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn internal_link(&self, id: &str, title: Option<&str>) -> String {
        let target = id.trim_start_matches(':');
        format!(
            "<a href=\"/{}\" class=\"wikilink1\" title=\"{}\">{}</a>",
            escape_html(target),
            escape_html(target),
            escape_html(title.unwrap_or(target))
        )
    }

    fn external_link(&self, url: &str, title: Option<&str>, class: &str) -> String {
        format!(
            "<a href=\"{}\" class=\"{}\" rel=\"nofollow\">{}</a>",
            escape_html(url),
            class,
            escape_html(title.unwrap_or(url))
        )
    }

    fn internal_media(&self, media: &MediaRequest) -> String {
        let href = format!("/_media/{}", media.src.trim_start_matches(':').replace(':', "/"));
        self.media(media, &href)
    }

    fn external_media(&self, media: &MediaRequest) -> String {
        self.media(media, &media.src)
    }

    fn page_url(&self, id: &str, query: &str) -> String {
        if query.is_empty() {
            format!("/{}", id)
        } else {
            format!("/{}?{}", id, query)
        }
    }

    fn first_heading(&self, _id: &str) -> Option<String> {
        None
    }

    /// Every value is a single paragraph of text.
    fn instructions(&self, markup: &str) -> Vec<Instruction> {
        vec![
            Instruction::new("document_start"),
            Instruction::new("p_open"),
            Instruction::new("cdata").with_arg(markup),
            Instruction::new("p_close"),
            Instruction::new("document_end"),
        ]
    }

    fn render_inline(&self, instructions: &[Instruction], _ctx: &dyn PageContext) -> String {
        instructions
            .iter()
            .map(|i| match i.name.as_str() {
                "cdata" => escape_html(&i.args.concat()),
                "p_open" => "<p>".to_string(),
                "p_close" => "</p>".to_string(),
                _ => String::new(),
            })
            .collect()
    }
}

/// Page context built from command line options.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub user: String,
    pub groups: Vec<String>,
    pub id: String,
    pub lang: String,
}

impl PageContext for CliContext {
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
}
