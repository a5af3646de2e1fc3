//! Route table

use crate::handlers::{self, lists, todos};
use crate::server::AppState;
use crate::session::session_middleware;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// Every page route and the fallback run inside the session middleware.
/// `/health` and the static script are served without touching sessions.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/lists", get(lists::index).post(lists::create))
        .route("/lists/new", get(lists::new_form))
        .route("/lists/:id", get(lists::show).post(lists::update))
        .route("/lists/:id/edit", get(lists::edit_form))
        .route("/lists/:id/delete", post(lists::destroy))
        .route("/lists/:list_id/todos", post(todos::create))
        .route("/lists/:list_id/todos/:todo_id", post(todos::toggle))
        .route("/lists/:list_id/todos/:todo_id/delete", post(todos::destroy))
        .route("/lists/:list_id/complete_all", post(todos::complete_all))
        .fallback(handlers::fallback)
        .layer(from_fn_with_state(state.clone(), session_middleware))
        .route("/health", get(handlers::health_check))
        .route("/javascripts/application.js", get(handlers::application_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
