//! Deck parsing for the card's presentation document.
//!
//! The bundled document is a remark.js-style deck: slides are separated by
//! `---` lines and each slide's body starts after a `class: center, middle`
//! marker. A slide is either a single inline image reference or a block of
//! text with heading markers removed.

use regex::Regex;
use std::sync::OnceLock;

/// Marker line that opens every slide body.
pub const SLIDE_MARKER: &str = "class: center, middle";

// Compiled once; a deck is re-parsed every time the card is opened.
fn image_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img src="([^"]+)""#).expect("image tag pattern"))
}

fn heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#\s*").expect("heading marker pattern"))
}

/// One unit of presentation content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slide {
    /// Plain text, markup stripped.
    Text(String),
    /// Relative path to an image resource, as written in the document.
    Image(String),
}

/// Parse a deck document into its ordered slides.
///
/// Segments without the slide marker (the remark.js preamble, trailing
/// HTML scaffolding) produce no slide.
pub fn parse_deck(input: &str) -> Vec<Slide> {
    input
        .split("---")
        .filter_map(|segment| {
            let at = segment.find(SLIDE_MARKER)?;
            Some(classify(&segment[at + SLIDE_MARKER.len()..]))
        })
        .collect()
}

fn classify(body: &str) -> Slide {
    if let Some(caps) = image_tag().captures(body) {
        Slide::Image(caps[1].to_string())
    } else {
        Slide::Text(heading_marker().replace_all(body.trim(), "").into_owned())
    }
}
