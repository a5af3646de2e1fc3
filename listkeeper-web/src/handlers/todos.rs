//! Handlers for todos inside a list

use super::{
    is_ajax, parse_list_id, parse_todo_id, recover_not_found, redirect_missing,
    redirect_with_success, render_invalid, LIST_NOT_FOUND, TODOS_COMPLETED, TODO_ADDED,
    TODO_DELETED, TODO_NOT_FOUND, TODO_UPDATED,
};
use crate::error::Result;
use crate::forms::{TodoForm, ToggleForm};
use crate::server::AppState;
use crate::session::Session;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Form};
use listkeeper_templating::ListView;
use listkeeper_todo::{ListId, SessionData, TodoError, TodoId};
use tracing::info;

/// Resolve both path segments, or the redirect to send instead
fn parse_ids(
    data: &mut SessionData,
    list_id: &str,
    todo_id: &str,
) -> std::result::Result<(ListId, TodoId), Response> {
    let Some(list_id) = parse_list_id(list_id) else {
        return Err(redirect_missing(data, LIST_NOT_FOUND));
    };
    if data.lists.find_list(list_id).is_err() {
        tracing::warn!("List {} not found", list_id);
        return Err(redirect_missing(data, LIST_NOT_FOUND));
    }
    match parse_todo_id(todo_id) {
        Some(todo_id) => Ok((list_id, todo_id)),
        None => Err(redirect_missing(data, TODO_NOT_FOUND)),
    }
}

/// `POST /lists/:list_id/todos`
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(list_id) = parse_list_id(&list_id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    match data.lists.add_todo(list_id, &form.todo).map(|todo| todo.id) {
        Ok(todo_id) => {
            info!("Added todo {} to list {}", todo_id, list_id);
            Ok(redirect_with_success(
                data,
                TODO_ADDED,
                &format!("/lists/{list_id}"),
            ))
        }
        Err(TodoError::Validation(err)) => {
            let flash = data.flash.take();
            let list = data.lists.find_list(list_id)?;
            render_invalid(
                &state,
                &ListView::with_input(list, form.todo),
                flash,
                err.to_string(),
            )
        }
        Err(err) => recover_not_found(data, err),
    }
}

/// `POST /lists/:list_id/todos/:todo_id/delete`
///
/// Script requests get an empty `204 No Content`.
pub async fn destroy(
    Extension(session): Extension<Session>,
    Path((list_id, todo_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let (list_id, todo_id) = match parse_ids(data, &list_id, &todo_id) {
        Ok(ids) => ids,
        Err(redirect) => return Ok(redirect),
    };
    if let Err(err) = data.lists.delete_todo(list_id, todo_id) {
        return recover_not_found(data, err);
    }
    info!("Deleted todo {} from list {}", todo_id, list_id);

    if is_ajax(&headers) {
        data.flash.set_success(TODO_DELETED);
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(redirect_with_success(
            data,
            TODO_DELETED,
            &format!("/lists/{list_id}"),
        ))
    }
}

/// `POST /lists/:list_id/todos/:todo_id`
pub async fn toggle(
    Extension(session): Extension<Session>,
    Path((list_id, todo_id)): Path<(String, String)>,
    Form(form): Form<ToggleForm>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let (list_id, todo_id) = match parse_ids(data, &list_id, &todo_id) {
        Ok(ids) => ids,
        Err(redirect) => return Ok(redirect),
    };
    let completed = form.is_completed();
    if let Err(err) = data.lists.set_todo_completed(list_id, todo_id, completed) {
        return recover_not_found(data, err);
    }
    info!(
        "Marked todo {} in list {} completed={}",
        todo_id, list_id, completed
    );

    Ok(redirect_with_success(
        data,
        TODO_UPDATED,
        &format!("/lists/{list_id}"),
    ))
}

/// `POST /lists/:list_id/complete_all`
pub async fn complete_all(
    Extension(session): Extension<Session>,
    Path(list_id): Path<String>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(list_id) = parse_list_id(&list_id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    match data.lists.complete_all(list_id) {
        Ok(changed) => {
            info!("Completed {} todos in list {}", changed, list_id);
            Ok(redirect_with_success(
                data,
                TODOS_COMPLETED,
                &format!("/lists/{list_id}"),
            ))
        }
        Err(err) => recover_not_found(data, err),
    }
}
