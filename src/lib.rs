//! docviewer - client for a document-search backend.
//!
//! The core is [`viewer::DocumentViewer`], a headless controller for the
//! full-document overlay. [`api`] talks to the backend, [`markup`] holds
//! the escaping and highlight helpers, and [`terminal`] plus [`cli`] wire
//! everything to a terminal.

pub mod api;
pub mod cli;
pub mod config;
pub mod markup;
pub mod terminal;
pub mod viewer;
