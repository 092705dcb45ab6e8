//! Chat page — static HTML with the inline chat widget.

use axum::response::Html;

/// The page markup, compiled into the binary.
pub const PAGE_HTML: &str = include_str!("../../assets/index.html");

/// `GET /` — serve the chat page. Identical for every request.
pub async fn page_handler() -> Html<&'static str> {
    Html(PAGE_HTML)
}
