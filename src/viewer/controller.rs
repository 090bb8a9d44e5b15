//! Document viewer lifecycle: open, act on, and close the overlay.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::labels::ViewerLabels;
use super::render::{render_overlay, render_print_document};
use super::session::ViewerSession;
use super::surfaces::{
    Clipboard, DocumentSource, LoadingIndicator, NotificationKind, Notifier, OverlayHost,
    PrintSurface,
};
use crate::markup::escape_html;

/// The presentation surfaces a viewer drives.
#[derive(Clone)]
pub struct Surfaces {
    pub loading: Arc<dyn LoadingIndicator>,
    pub notifier: Arc<dyn Notifier>,
    pub overlay: Arc<dyn OverlayHost>,
    pub clipboard: Arc<dyn Clipboard>,
    pub printer: Arc<dyn PrintSurface>,
}

/// How an `open_viewer` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The overlay shows the requested document.
    Opened,
    /// Nothing was opened; an error notification was emitted.
    Failed,
    /// A newer open started before this one resolved; the result was dropped.
    Superseded,
}

#[derive(Default)]
struct ViewerState {
    /// Bumped by every open attempt that issues a request.
    generation: u64,
    session: Option<ViewerSession>,
}

/// Hides the loading indicator when dropped, on every exit path.
struct LoadingGuard<'a> {
    indicator: &'a dyn LoadingIndicator,
}

impl<'a> LoadingGuard<'a> {
    fn show(indicator: &'a dyn LoadingIndicator, message: &str) -> Self {
        indicator.show(message);
        Self { indicator }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

/// Controller for the full-document overlay.
///
/// Holds at most one [`ViewerSession`]. The state lock is never held across
/// the network request, so concurrent opens race only at that boundary and
/// the newest open wins.
pub struct DocumentViewer<S> {
    source: S,
    surfaces: Surfaces,
    labels: ViewerLabels,
    state: Mutex<ViewerState>,
}

impl<S: DocumentSource> DocumentViewer<S> {
    pub fn new(source: S, surfaces: Surfaces, labels: ViewerLabels) -> Self {
        Self {
            source,
            surfaces,
            labels,
            state: Mutex::new(ViewerState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch a document and show it in the overlay.
    ///
    /// Failures become one error notification. A prior session survives a
    /// failed open and is replaced by a successful one.
    pub async fn open_viewer(&self, doc_id: &str, query: &str) -> OpenOutcome {
        // Rejected before taking a generation so in-flight opens stay current
        if doc_id.trim().is_empty() {
            warn!("Refusing to open viewer without a document id");
            self.surfaces
                .notifier
                .notify(NotificationKind::Error, &self.labels.load_failed);
            return OpenOutcome::Failed;
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.generation
        };

        let _loading = LoadingGuard::show(self.surfaces.loading.as_ref(), &self.labels.loading);
        let result = self.source.fetch_full_document(doc_id, query).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(
                "Discarding stale response for {} (generation {} < {})",
                doc_id, generation, state.generation
            );
            return OpenOutcome::Superseded;
        }

        match result {
            Ok(payload) => {
                self.teardown(&mut state);

                let session = ViewerSession::new(payload, query);
                let overlay = render_overlay(&session, &self.labels);
                self.surfaces.overlay.mount(&overlay);
                info!(
                    "Opened {} ({} words, {})",
                    session.payload().document_name,
                    session.payload().word_count,
                    session.payload().score_percentage
                );
                state.session = Some(session);
                OpenOutcome::Opened
            }
            Err(e) => {
                warn!("Failed to load document {}: {}", doc_id, e);
                let message = match e.backend_message() {
                    Some(message) => escape_html(message),
                    None => self.labels.load_failed.clone(),
                };
                self.surfaces
                    .notifier
                    .notify(NotificationKind::Error, &message);
                OpenOutcome::Failed
            }
        }
    }

    /// Close the overlay and drop the session. No-op when already closed.
    ///
    /// Also serves as the overlay host's teardown callback.
    pub async fn close_viewer(&self) {
        let mut state = self.state.lock().await;
        self.teardown(&mut state);
    }

    fn teardown(&self, state: &mut ViewerState) {
        if let Some(session) = state.session.take() {
            self.surfaces.overlay.unmount();
            info!("Closed {}", session.payload().document_name);
        }
    }

    /// Copy the displayed body's plain text to the clipboard.
    pub async fn copy_current_text(&self) {
        let state = self.state.lock().await;
        let Some(session) = state.session.as_ref() else {
            return;
        };

        let text = session.text();
        match self.surfaces.clipboard.write_text(&text) {
            Ok(()) => {
                debug!("Copied {} characters", text.chars().count());
                self.surfaces
                    .notifier
                    .notify(NotificationKind::Success, &self.labels.copy_success);
            }
            Err(e) => {
                warn!("Error copying text: {}", e);
                self.surfaces
                    .notifier
                    .notify(NotificationKind::Error, &self.labels.copy_failed);
            }
        }
    }

    /// Print the document as currently displayed.
    pub async fn print_current_document(&self) {
        let state = self.state.lock().await;
        let Some(session) = state.session.as_ref() else {
            return;
        };

        let document = render_print_document(session, &self.labels);
        if let Err(e) = self
            .surfaces
            .printer
            .print(&session.payload().document_name, &document)
        {
            warn!("Print surface unavailable: {}", e);
        }
    }

    /// Toggle highlight visibility. Returns the new state, or `None`
    /// without a session.
    pub async fn toggle_highlights(&self) -> Option<bool> {
        let mut state = self.state.lock().await;
        let session = state.session.as_mut()?;

        let visible = session.toggle_highlights();
        self.surfaces.overlay.set_body(session.displayed_body());
        self.surfaces
            .overlay
            .set_toggle_label(self.labels.toggle_label(visible));
        debug!("Highlights {}", if visible { "shown" } else { "hidden" });
        Some(visible)
    }

    pub async fn is_open(&self) -> bool {
        self.state.lock().await.session.is_some()
    }

    /// Inspect the live session, if any.
    pub async fn with_session<R>(&self, f: impl FnOnce(&ViewerSession) -> R) -> Option<R> {
        self.state.lock().await.session.as_ref().map(f)
    }
}
