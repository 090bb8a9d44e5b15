//! Full-document viewer.
//!
//! A headless controller for the overlay that shows one search result in
//! full, with its highlights, plus copy/print/toggle actions. Presentation
//! is delegated to the traits in [`surfaces`].

mod controller;
mod labels;
mod render;
mod session;
pub mod surfaces;

pub use controller::{DocumentViewer, OpenOutcome, Surfaces};
pub use labels::ViewerLabels;
pub use render::{render_overlay, render_print_document, RenderedOverlay, PRINT_CSS};
pub use session::ViewerSession;
pub use surfaces::{
    Clipboard, DocumentSource, LoadingIndicator, NotificationKind, Notifier, OverlayHost,
    PrintSurface, SurfaceError,
};
