//! Handlers for whole lists

use super::{
    is_ajax, parse_list_id, recover_not_found, redirect_missing, redirect_with_success, render,
    render_invalid, LIST_CREATED, LIST_DELETED, LIST_NOT_FOUND, LIST_UPDATED,
};
use crate::error::Result;
use crate::forms::ListForm;
use crate::server::AppState;
use crate::session::Session;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Form};
use listkeeper_templating::{EditListView, ListView, ListsView, NewListView};
use listkeeper_todo::TodoError;
use tracing::info;

/// `GET /lists`
pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let flash = data.flash.take();
    render(&state, &ListsView::new(&data.lists), flash)
}

/// `GET /lists/new`
pub async fn new_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let flash = data.flash.take();
    render(&state, &NewListView::default(), flash)
}

/// `POST /lists`
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<ListForm>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    match data.lists.create_list(&form.list_name).map(|list| list.id) {
        Ok(id) => {
            info!("Created list {}", id);
            Ok(redirect_with_success(data, LIST_CREATED, "/lists"))
        }
        Err(TodoError::Validation(err)) => {
            let flash = data.flash.take();
            render_invalid(&state, &NewListView::new(form.list_name), flash, err.to_string())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /lists/:id`
pub async fn show(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(id) = parse_list_id(&id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    match data.lists.find_list(id) {
        Ok(list) => render(&state, &ListView::new(list), data.flash.take()),
        Err(err) => recover_not_found(data, err),
    }
}

/// `GET /lists/:id/edit`
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(id) = parse_list_id(&id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    match data.lists.find_list(id) {
        Ok(list) => render(&state, &EditListView::new(list), data.flash.take()),
        Err(err) => recover_not_found(data, err),
    }
}

/// `POST /lists/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Form(form): Form<ListForm>,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(id) = parse_list_id(&id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    match data.lists.rename_list(id, &form.list_name).map(|list| list.id) {
        Ok(id) => {
            info!("Renamed list {}", id);
            Ok(redirect_with_success(
                data,
                LIST_UPDATED,
                &format!("/lists/{id}"),
            ))
        }
        Err(TodoError::Validation(err)) => {
            let flash = data.flash.take();
            let list = data.lists.find_list(id)?;
            render_invalid(
                &state,
                &EditListView::with_input(list, form.list_name),
                flash,
                err.to_string(),
            )
        }
        Err(err) => recover_not_found(data, err),
    }
}

/// `POST /lists/:id/delete`
///
/// Script requests get the address to navigate to as the response body.
pub async fn destroy(
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut guard = session.lock().await;
    let data = &mut *guard;
    let Some(id) = parse_list_id(&id) else {
        return Ok(redirect_missing(data, LIST_NOT_FOUND));
    };
    if let Err(err) = data.lists.delete_list(id) {
        return recover_not_found(data, err);
    }
    info!("Deleted list {}", id);

    if is_ajax(&headers) {
        data.flash.set_success(LIST_DELETED);
        Ok((StatusCode::OK, "/lists").into_response())
    } else {
        Ok(redirect_with_success(data, LIST_DELETED, "/lists"))
    }
}
