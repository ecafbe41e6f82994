//! Embed-insertion list cell
//!
//! The list view shows, per media item, a link the rich-text editor picks
//! up to insert the item's host embed. Embed markup comes from the remote
//! host and is treated as untrusted: it is encoded as a JavaScript string
//! literal, then HTML-attribute-escaped. The title is HTML-text-escaped.

use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

use multimedias_core::models::{HostProvider, HostStatus, MediaHostRecord, MediaItem};

pub const EMBED_CELL_CLASS: &str = "multimedias-insert-embed";

/// Escape text for an HTML text node or a double-quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quoted JavaScript string literal for `input`.
///
/// JSON string syntax is valid JavaScript once the line separators are
/// escaped; `<`, `>` and `&` are escaped too so the literal can never close
/// a surrounding `<script>` element.
pub fn js_string_literal(input: &str) -> String {
    // Serializing a &str cannot fail.
    let json = serde_json::to_string(input).unwrap_or_default();
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Insert-embed anchor for one media item.
#[derive(Debug, Clone)]
pub struct EmbedCell<'a> {
    pub media_id: Uuid,
    pub label: &'a str,
    pub embed: &'a str,
}

impl<'a> EmbedCell<'a> {
    pub fn new(item: &'a MediaItem, embed: &'a str) -> Self {
        Self {
            media_id: item.id,
            label: &item.title,
            embed,
        }
    }
}

impl Display for EmbedCell<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            r##"<a href="#" class="{}" data-media-id="{}" data-embed="{}">Insert: {}</a>"##,
            EMBED_CELL_CLASS,
            self.media_id,
            escape_html(&js_string_literal(self.embed)),
            escape_html(self.label),
        )
    }
}

pub fn render_embed_cell(item: &MediaItem, embed: &str) -> String {
    EmbedCell::new(item, embed).to_string()
}

/// Embed markup to offer for an item: the uploaded video-sharing embed when
/// there is one, else the uploaded generic host embed.
pub fn pick_embed(records: &[MediaHostRecord]) -> Option<&str> {
    let uploaded = |provider: HostProvider| {
        records
            .iter()
            .find(|r| {
                r.provider == provider && r.status == HostStatus::Uploaded && !r.embed.is_empty()
            })
            .map(|r| r.embed.as_str())
    };
    uploaded(HostProvider::VideoSharing).or_else(|| uploaded(HostProvider::Generic))
}
