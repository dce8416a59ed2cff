//! Book instance pages

use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
    Form,
};
use maud::Markup;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstanceDeleteForm, BookInstanceForm},
    views, AppState,
};

use super::respond;

/// List all book copies
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Markup> {
    let page = state.services.book_instances.list().await?;
    Ok(views::render(&page))
}

/// Book copy details
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Markup> {
    let page = state.services.book_instances.detail(id).await?;
    Ok(views::render(&page))
}

/// Empty create form
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Markup> {
    let page = state.services.book_instances.create_form().await?;
    Ok(views::render(&page))
}

/// Handle create form submission
pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(&form).await?;
    Ok(respond(outcome))
}

/// Delete confirmation
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.delete_form(id).await?;
    Ok(respond(outcome))
}

/// Handle delete confirmation. The id comes from the form, not the path.
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceDeleteForm>,
) -> AppResult<Redirect> {
    let location = state.services.book_instances.delete(&form).await?;
    Ok(Redirect::to(&location))
}

/// Update form
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Markup> {
    let page = state.services.book_instances.update_form(id).await?;
    Ok(views::render(&page))
}

/// Handle update form submission
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.update(id, &form).await?;
    Ok(respond(outcome))
}
