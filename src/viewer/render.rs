//! HTML rendering for the document overlay and its print view.

use super::labels::ViewerLabels;
use super::session::ViewerSession;
use crate::markup::escape_html;

/// Everything an overlay host needs to display a session.
///
/// Display strings are already escaped; `body` is the session's body
/// markup, inserted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    pub title: String,
    pub score_badge: String,
    pub word_count: u64,
    pub query: String,
    pub body: String,
    pub toggle_label: String,
    /// Complete overlay markup for hosts that render HTML.
    pub html: String,
}

/// Render the overlay for a session.
pub fn render_overlay(session: &ViewerSession, labels: &ViewerLabels) -> RenderedOverlay {
    let payload = session.payload();
    let title = escape_html(&payload.document_name);
    let score_badge = escape_html(&payload.score_percentage);
    let query = escape_html(session.query());
    let body = session.displayed_body().to_string();
    let toggle_label = labels.toggle_label(session.highlights_visible()).to_string();

    let html = format!(
        r#"<div class="overlay" id="full-document-overlay" role="dialog">
    <div class="overlay-header">
        <h5 class="overlay-title">{title}</h5>
        <span class="badge">{similarity}: {score}</span>
        <span class="word-count">{words} {words_label}</span>
        <div class="overlay-actions">
            <button type="button" data-action="copy">{copy}</button>
            <button type="button" data-action="print">{print}</button>
            <button type="button" data-action="toggle-highlights"><span id="highlight-toggle-text">{toggle}</span></button>
            <button type="button" data-action="close">{close}</button>
        </div>
    </div>
    <div class="overlay-body">
        <div class="search-info"><small>{search}: <strong>{query}</strong></small></div>
        <div id="full-document-content" class="document-content">{body}</div>
    </div>
</div>"#,
        title = title,
        similarity = escape_html(&labels.similarity),
        score = score_badge,
        words = payload.word_count,
        words_label = escape_html(&labels.words),
        copy = escape_html(&labels.copy),
        print = escape_html(&labels.print),
        toggle = escape_html(&toggle_label),
        close = escape_html(&labels.close),
        search = escape_html(&labels.search),
        query = query,
        body = body,
    );

    RenderedOverlay {
        title,
        score_badge,
        word_count: payload.word_count,
        query,
        body,
        toggle_label,
        html,
    }
}

/// Render a self-contained document for printing.
///
/// The body is the session's displayed body, so hidden highlights stay
/// hidden on paper.
pub fn render_print_document(session: &ViewerSession, labels: &ViewerLabels) -> String {
    let payload = session.payload();
    let title = escape_html(&payload.document_name);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="header">
        <h1>{title}</h1>
        <div class="document-info">
            {similarity}: {score} | {words_label}: {words} | {search}: "{query}"
        </div>
    </div>
    <div class="content">
        {body}
    </div>
</body>
</html>"#,
        title = title,
        css = PRINT_CSS,
        similarity = escape_html(&labels.similarity),
        score = escape_html(&payload.score_percentage),
        words_label = escape_html(&labels.words),
        words = payload.word_count,
        search = escape_html(&labels.search),
        query = escape_html(session.query()),
        body = session.displayed_body(),
    )
}

/// Print styles - right-to-left friendly, highlights kept visible on paper.
pub const PRINT_CSS: &str = r#"
body {
    font-family: Arial, sans-serif;
    direction: rtl;
    text-align: right;
    line-height: 1.6;
    margin: 20px;
}
mark, .search-highlight {
    background-color: yellow;
    padding: 2px 4px;
    border-radius: 3px;
}
.header {
    border-bottom: 2px solid #333;
    padding-bottom: 10px;
    margin-bottom: 20px;
}
.document-info {
    color: #666;
    font-size: 14px;
    margin-bottom: 10px;
}
"#;
