//! Plain-text views of an HTML fragment.

use scraper::{Html, Node};

use super::HIGHLIGHT_TAG;

/// A run of text and whether it sits inside a highlight marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Text content of a fragment: the concatenated text nodes, entities
/// decoded. Elements, `<br>` included, contribute nothing.
pub fn text_content(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    fragment
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect()
}

/// Split a fragment into text runs for display, flagging runs inside
/// `<mark>`.
///
/// Adjacent runs with the same flag are merged. `<br>` becomes a newline
/// so line structure survives on a terminal.
pub fn styled_segments(markup: &str) -> Vec<Segment> {
    let fragment = Html::parse_fragment(markup);
    let mut segments: Vec<Segment> = Vec::new();

    for node in fragment.tree.root().descendants() {
        let (text, highlighted) = match node.value() {
            Node::Text(text) => {
                let highlighted = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| el.name() == HIGHLIGHT_TAG)
                });
                (&**text, highlighted)
            }
            Node::Element(el) if el.name() == "br" => ("\n", false),
            _ => continue,
        };

        match segments.last_mut() {
            Some(last) if last.highlighted == highlighted => last.text.push_str(text),
            _ => segments.push(Segment {
                text: text.to_string(),
                highlighted,
            }),
        }
    }

    segments
}
