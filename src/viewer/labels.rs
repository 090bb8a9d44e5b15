use serde::{Deserialize, Serialize};

/// User-visible strings shown by the viewer.
///
/// Front ends serving a localized page override these from config; missing
/// keys fall back to the English defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerLabels {
    pub loading: String,
    pub load_failed: String,
    pub copy_success: String,
    pub copy_failed: String,
    pub hide_highlights: String,
    pub show_highlights: String,
    pub similarity: String,
    pub words: String,
    pub search: String,
    pub copy: String,
    pub print: String,
    pub close: String,
}

impl Default for ViewerLabels {
    fn default() -> Self {
        Self {
            loading: "Loading full document...".to_string(),
            load_failed: "Could not load the document".to_string(),
            copy_success: "Copied text to clipboard".to_string(),
            copy_failed: "Could not copy text".to_string(),
            hide_highlights: "Hide highlights".to_string(),
            show_highlights: "Show highlights".to_string(),
            similarity: "Similarity".to_string(),
            words: "words".to_string(),
            search: "Search".to_string(),
            copy: "Copy".to_string(),
            print: "Print".to_string(),
            close: "Close".to_string(),
        }
    }
}

impl ViewerLabels {
    /// Label for the toggle affordance given the current highlight state.
    pub fn toggle_label(&self, highlights_visible: bool) -> &str {
        if highlights_visible {
            &self.hide_highlights
        } else {
            &self.show_highlights
        }
    }
}
