//! Seams between the viewer controller and whatever presents it.
//!
//! The controller never touches a terminal, a browser or the network
//! directly. Every side effect goes through one of these traits.

use async_trait::async_trait;
use thiserror::Error;

use super::render::RenderedOverlay;
use crate::api::{ApiError, DocumentPayload};

/// Kind of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Fire-and-forget, auto-dismissing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Non-blocking loading indicator.
///
/// Calls are balanced: every `show` is followed by exactly one `hide`.
/// Implementations stay visible while any `show` is outstanding.
pub trait LoadingIndicator: Send + Sync {
    fn show(&self, message: &str);
    fn hide(&self);
}

/// Host able to mount, update and unmount the document overlay.
///
/// When the user dismisses the overlay by any means the host must call
/// `DocumentViewer::close_viewer` so the session is released.
pub trait OverlayHost: Send + Sync {
    fn mount(&self, overlay: &RenderedOverlay);
    fn set_body(&self, body: &str);
    fn set_toggle_label(&self, label: &str);
    fn unmount(&self);
}

/// System clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), SurfaceError>;
}

/// Isolated surface a self-contained document can be printed from.
pub trait PrintSurface: Send + Sync {
    fn print(&self, title: &str, document: &str) -> Result<(), SurfaceError>;
}

/// Where the viewer gets documents from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_full_document(
        &self,
        doc_id: &str,
        query: &str,
    ) -> Result<DocumentPayload, ApiError>;
}

/// Failures reported by clipboard and print surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
