use crate::api::DocumentPayload;
use crate::markup::{text_content, unwrap_highlights};

/// State of the document currently shown in the overlay.
///
/// At most one exists at a time; the controller owns it and drops it when
/// the overlay closes.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSession {
    payload: DocumentPayload,
    query: String,
    highlights_visible: bool,
    displayed_body: String,
}

impl ViewerSession {
    pub fn new(payload: DocumentPayload, query: &str) -> Self {
        let displayed_body = payload.full_content.clone();
        Self {
            payload,
            query: query.to_string(),
            highlights_visible: true,
            displayed_body,
        }
    }

    pub fn payload(&self) -> &DocumentPayload {
        &self.payload
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlights_visible(&self) -> bool {
        self.highlights_visible
    }

    /// Body markup as currently displayed.
    pub fn displayed_body(&self) -> &str {
        &self.displayed_body
    }

    /// Plain text of the displayed body.
    pub fn text(&self) -> String {
        text_content(&self.displayed_body)
    }

    /// Flip highlight visibility and return the new state.
    ///
    /// Hiding unwraps markers from the displayed body. Showing restores the
    /// stored `full_content` rather than recomputing it.
    pub fn toggle_highlights(&mut self) -> bool {
        if self.highlights_visible {
            self.displayed_body = unwrap_highlights(&self.displayed_body);
            self.highlights_visible = false;
        } else {
            self.displayed_body = self.payload.full_content.clone();
            self.highlights_visible = true;
        }
        self.highlights_visible
    }
}
