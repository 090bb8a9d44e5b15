use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::viewer::{PrintSurface, SurfaceError};

/// "Prints" by writing the self-contained document to a file, ready to be
/// opened in a browser and sent to a printer.
pub struct FilePrintSurface {
    dir: PathBuf,
}

impl FilePrintSurface {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

/// File name for a printed document, safe on every platform.
pub fn print_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "document.html".to_string()
    } else {
        format!("{}.html", stem)
    }
}

impl PrintSurface for FilePrintSurface {
    fn print(&self, title: &str, document: &str) -> Result<(), SurfaceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(print_file_name(title));
        fs::write(&path, document)?;
        info!("Print document written to {}", path.display());
        Ok(())
    }
}
