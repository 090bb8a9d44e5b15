//! Markup helpers for rendering untrusted document data.
//!
//! Three concerns live here:
//! - escaping display strings before they are interpolated into HTML
//! - unwrapping highlight markers from server-generated fragments
//! - extracting plain text from a fragment (for clipboard and terminal output)

mod escape;
mod highlight;
mod text;

pub use escape::escape_html;
pub use highlight::{contains_highlights, unwrap_highlights, HIGHLIGHT_TAG};
pub use text::{styled_segments, text_content, Segment};
