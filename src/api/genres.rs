//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
    Form,
};
use maud::Markup;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::genre::{GenreDeleteForm, GenreForm},
    views, AppState,
};

use super::respond;

/// List all genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Markup> {
    let page = state.services.genres.list().await?;
    Ok(views::render(&page))
}

/// Genre details with its books
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Markup> {
    let page = state.services.genres.detail(id).await?;
    Ok(views::render(&page))
}

/// Empty create form
pub async fn create_genre_form(State(state): State<AppState>) -> Markup {
    views::render(&state.services.genres.create_form())
}

/// Handle create form submission
pub async fn create_genre(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.create(&form).await?;
    Ok(respond(outcome))
}

/// Delete confirmation
pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Markup> {
    let page = state.services.genres.delete_form(id).await?;
    Ok(views::render(&page))
}

/// Handle delete confirmation
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreDeleteForm>,
) -> AppResult<Redirect> {
    let location = state.services.genres.delete(id, &form).await?;
    Ok(Redirect::to(&location))
}

/// Update form
pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Markup> {
    let page = state.services.genres.update_form(id).await?;
    Ok(views::render(&page))
}

/// Handle update form submission
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.update(id, &form).await?;
    Ok(respond(outcome))
}
