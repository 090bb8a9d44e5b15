//! Terminal implementations of the viewer surfaces.

mod clipboard;
mod loading;
mod notify;
mod overlay;
mod print;

pub use clipboard::Osc52Clipboard;
pub use loading::SpinnerLoading;
pub use notify::ConsoleNotifier;
pub use overlay::TerminalOverlay;
pub use print::{print_file_name, FilePrintSurface};

use std::path::PathBuf;
use std::sync::Arc;

use crate::viewer::Surfaces;

/// Surfaces for an interactive terminal session.
pub fn terminal_surfaces(print_dir: PathBuf) -> Surfaces {
    Surfaces {
        loading: Arc::new(SpinnerLoading::new()),
        notifier: Arc::new(ConsoleNotifier::new()),
        overlay: Arc::new(TerminalOverlay::new()),
        clipboard: Arc::new(Osc52Clipboard::new()),
        printer: Arc::new(FilePrintSurface::new(print_dir)),
    }
}
