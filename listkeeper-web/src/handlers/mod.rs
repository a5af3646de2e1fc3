//! Request handlers
//!
//! Every handler locks the request's [`Session`](crate::session::Session),
//! applies one operation to its lists, queues a flash message and then either
//! redirects or renders a page. Lookups that find nothing end in a redirect to
//! `/lists` carrying a not-found message.

pub mod lists;
pub mod todos;

use crate::error::Result;
use crate::server::AppState;
use crate::session::Session;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Extension;
use listkeeper_templating::View;
use listkeeper_todo::{Flash, ListId, SessionData, TodoError, TodoId};

pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_UPDATED: &str = "The list has been updated.";
pub const LIST_DELETED: &str = "The list has been deleted.";
pub const TODO_ADDED: &str = "The todo was added.";
pub const TODO_DELETED: &str = "The todo has been deleted.";
pub const TODO_UPDATED: &str = "The todo has been updated.";
pub const TODOS_COMPLETED: &str = "All todos have been completed.";
pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const TODO_NOT_FOUND: &str = "The specified todo was not found.";
pub const PAGE_NOT_FOUND: &str = "The page you requested was not found.";

/// Header set by the bundled script on its delete requests
pub const REQUESTED_WITH: &str = "x-requested-with";

/// True when the request came from a script rather than a form submission
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "XMLHttpRequest")
}

/// Render a page with status 200
pub(crate) fn render<V: View>(state: &AppState, view: &V, flash: Flash) -> Result<Response> {
    render_with_status(state, view, flash, StatusCode::OK)
}

/// Redisplay a form after its submission was rejected
pub(crate) fn render_invalid<V: View>(
    state: &AppState,
    view: &V,
    mut flash: Flash,
    message: String,
) -> Result<Response> {
    tracing::warn!("Rejected submission: {}", message);
    flash.set_error(message);
    render_with_status(state, view, flash, StatusCode::UNPROCESSABLE_ENTITY)
}

fn render_with_status<V: View>(
    state: &AppState,
    view: &V,
    flash: Flash,
    status: StatusCode,
) -> Result<Response> {
    let body = state.views.render_page(view, flash)?;
    Ok((status, Html(body)).into_response())
}

/// Queue a success message and redirect
pub(crate) fn redirect_with_success(data: &mut SessionData, message: &str, to: &str) -> Response {
    data.flash.set_success(message);
    Redirect::to(to).into_response()
}

/// Queue an error message and send the visitor back to `/lists`
pub(crate) fn redirect_missing(data: &mut SessionData, message: &str) -> Response {
    tracing::debug!("Redirecting to /lists: {}", message);
    data.flash.set_error(message);
    Redirect::to("/lists").into_response()
}

/// Turn a failed lookup into the matching not-found redirect
///
/// Errors other than not-found are passed through.
pub(crate) fn recover_not_found(data: &mut SessionData, err: TodoError) -> Result<Response> {
    match err {
        TodoError::ListNotFound { id } => {
            tracing::warn!("List {} not found", id);
            Ok(redirect_missing(data, LIST_NOT_FOUND))
        }
        TodoError::TodoNotFound { list_id, todo_id } => {
            tracing::warn!("Todo {} not found in list {}", todo_id, list_id);
            Ok(redirect_missing(data, TODO_NOT_FOUND))
        }
        other => Err(other.into()),
    }
}

/// Parse a list id path segment; non-numeric ids match no list
pub(crate) fn parse_list_id(raw: &str) -> Option<ListId> {
    raw.parse().ok()
}

pub(crate) fn parse_todo_id(raw: &str) -> Option<TodoId> {
    raw.parse().ok()
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// Any unmatched route
pub async fn fallback(Extension(session): Extension<Session>) -> Response {
    let mut data = session.lock().await;
    redirect_missing(&mut data, PAGE_NOT_FOUND)
}

/// `GET /health`
pub async fn health_check() -> &'static str {
    "OK"
}

/// `GET /javascripts/application.js`
pub async fn application_js() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("../../assets/application.js"),
    )
}
