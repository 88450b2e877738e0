//! Page Routes
//!
//! - GET / - The dashboard page
//! - GET /_dash-layout - Widget tree
//! - GET /_dash-dependencies - Binding declarations

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::bindings::Declaration;
use crate::layout::Layout;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /_dash-layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(Layout::clone(&state.layout))
}

/// GET /_dash-dependencies
pub async fn dependencies(State(state): State<Arc<AppState>>) -> Json<Vec<Declaration>> {
    Json(state.dispatcher.registry().declarations())
}
