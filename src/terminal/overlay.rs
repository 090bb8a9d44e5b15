use std::sync::Mutex;

use console::{style, Term};

use crate::markup::{styled_segments, text_content};
use crate::viewer::{OverlayHost, RenderedOverlay};

#[derive(Default)]
struct OverlayView {
    title: String,
    badge: String,
    word_count: u64,
    query: String,
    toggle_label: String,
}

/// Renders the overlay as a block of text on stdout.
///
/// Highlighted terms are shown black on yellow. Every update redraws the
/// body below a fresh header; the key hint follows the toggle label.
pub struct TerminalOverlay {
    term: Term,
    view: Mutex<Option<OverlayView>>,
}

impl TerminalOverlay {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            view: Mutex::new(None),
        }
    }

    fn draw_header(&self, view: &OverlayView) {
        let width = self.term.size().1.clamp(20, 100) as usize;
        let _ = self.term.write_line(&style("─".repeat(width)).dim().to_string());
        let _ = self.term.write_line(&format!(
            "{}  {}  {}",
            style(&view.title).bold(),
            style(&view.badge).green(),
            style(format!("{} words", view.word_count)).dim()
        ));
        if !view.query.is_empty() {
            let _ = self
                .term
                .write_line(&format!("{} {}", style("query:").dim(), view.query));
        }
        let _ = self.term.write_line(&style("─".repeat(width)).dim().to_string());
    }

    fn draw_hint(&self, view: &OverlayView) {
        let _ = self.term.write_line(
            &style(format!("[h] {}  [c] copy  [p] print  [q] close", view.toggle_label))
                .dim()
                .to_string(),
        );
    }

    fn draw_body(&self, body: &str) {
        let mut out = String::new();
        for segment in styled_segments(body) {
            if segment.highlighted {
                out.push_str(&style(&segment.text).black().on_yellow().to_string());
            } else {
                out.push_str(&segment.text);
            }
        }
        let _ = self.term.write_line(out.trim_end());
    }
}

impl Default for TerminalOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayHost for TerminalOverlay {
    fn mount(&self, overlay: &RenderedOverlay) {
        // Display strings arrive escaped for HTML hosts
        let view = OverlayView {
            title: text_content(&overlay.title),
            badge: text_content(&overlay.score_badge),
            word_count: overlay.word_count,
            query: text_content(&overlay.query),
            toggle_label: overlay.toggle_label.clone(),
        };
        self.draw_header(&view);
        self.draw_body(&overlay.body);
        self.draw_hint(&view);
        *self.view.lock().unwrap_or_else(|e| e.into_inner()) = Some(view);
    }

    fn set_body(&self, body: &str) {
        let view = self.view.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(view) = view.as_ref() {
            self.draw_header(view);
            self.draw_body(body);
        }
    }

    fn set_toggle_label(&self, label: &str) {
        let mut view = self.view.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(view) = view.as_mut() {
            view.toggle_label = label.to_string();
            self.draw_hint(view);
        }
    }

    fn unmount(&self) {
        let mut view = self.view.lock().unwrap_or_else(|e| e.into_inner());
        if view.take().is_some() {
            let _ = self.term.write_line(&style("(closed)").dim().to_string());
        }
    }
}
