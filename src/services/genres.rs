//! Genre service

use std::sync::Arc;

use uuid::Uuid;

use super::{parse_id, Outcome};
use crate::{
    error::{AppError, AppResult},
    models::genre::{GenreData, GenreDeleteForm, GenreForm},
    repository::CatalogStore,
    validation::GENRE_CHAIN,
    views::{GenreDeletePage, GenreDetailPage, GenreFormPage, GenreListPage},
};

pub const GENRE_LIST_URL: &str = "/catalog/genres";

#[derive(Clone)]
pub struct GenreService {
    store: Arc<dyn CatalogStore>,
}

impl GenreService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All genres sorted by name
    pub async fn list(&self) -> AppResult<GenreListPage> {
        let genre_list = self.store.genres_list().await?;
        Ok(GenreListPage {
            title: "Genre list",
            genre_list,
        })
    }

    /// Genre with its books
    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetailPage> {
        let (genre, genre_books) = tokio::try_join!(
            self.store.genres_get(id),
            self.store.books_in_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        Ok(GenreDetailPage {
            title: "Genre Detail",
            genre,
            genre_books,
        })
    }

    pub fn create_form(&self) -> GenreFormPage {
        GenreFormPage {
            title: "Create Genre",
            genre: None,
            errors: Vec::new(),
        }
    }

    /// Create a genre unless one with an equivalent name exists, in which case
    /// the existing genre is shown instead.
    pub async fn create(&self, form: &GenreForm) -> AppResult<Outcome<GenreFormPage>> {
        let validation = GENRE_CHAIN.run(&[("name", form.name.as_str())]);
        let data = GenreData {
            name: validation.value("name").to_string(),
        };

        if !validation.is_valid() {
            return Ok(Outcome::Render(GenreFormPage {
                title: "Create Genre",
                genre: Some(GenreForm { name: data.name }),
                errors: validation.into_errors(),
            }));
        }

        if let Some(existing) = self.store.genres_find_by_name(&data.name).await? {
            tracing::debug!("Genre '{}' already exists as {}", data.name, existing.id);
            return Ok(Outcome::Redirect(existing.url()));
        }

        let genre = self.store.genres_create(&data).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(Outcome::Redirect(genre.url()))
    }

    /// Delete confirmation, listing the books that still use the genre
    pub async fn delete_form(&self, id: Uuid) -> AppResult<GenreDeletePage> {
        let (genre, books) = tokio::try_join!(
            self.store.genres_get(id),
            self.store.books_in_genre(id),
        )?;

        Ok(GenreDeletePage {
            title: "Delete genre",
            genre,
            books,
        })
    }

    /// Delete the genre named by the form unless books still reference the
    /// genre in the URL. Returns the redirect location.
    pub async fn delete(&self, id: Uuid, form: &GenreDeleteForm) -> AppResult<String> {
        let (_genre, books) = tokio::try_join!(
            self.store.genres_get(id),
            self.store.books_in_genre(id),
        )?;

        if !books.is_empty() {
            tracing::debug!("Genre {} still has {} book(s), not deleting", id, books.len());
            return Ok(GENRE_LIST_URL.to_string());
        }

        let target = parse_id(&form.genreid, "genre")?;
        self.store.genres_delete(target).await?;
        tracing::info!("Deleted genre {}", target);
        Ok(GENRE_LIST_URL.to_string())
    }

    /// Update form pre-filled with the current name. The genre may be missing.
    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreFormPage> {
        let genre = self.store.genres_get(id).await?;
        Ok(GenreFormPage {
            title: "Update Genre",
            genre: genre.map(|g| GenreForm { name: g.name }),
            errors: Vec::new(),
        })
    }

    /// Rename a genre. A name equivalent to another genre's shows that genre
    /// and leaves this one untouched.
    pub async fn update(&self, id: Uuid, form: &GenreForm) -> AppResult<Outcome<GenreFormPage>> {
        let validation = GENRE_CHAIN.run(&[("name", form.name.as_str())]);
        let data = GenreData {
            name: validation.value("name").to_string(),
        };

        if !validation.is_valid() {
            return Ok(Outcome::Render(GenreFormPage {
                title: "Create Genre",
                genre: Some(GenreForm { name: data.name }),
                errors: validation.into_errors(),
            }));
        }

        if let Some(existing) = self.store.genres_find_by_name(&data.name).await? {
            if existing.id != id {
                tracing::debug!("Genre name '{}' taken by {}, not updating {}", data.name, existing.id, id);
                return Ok(Outcome::Redirect(existing.url()));
            }
        }

        self.store.genres_update(id, &data).await?;
        tracing::info!("Updated genre {} ({})", id, data.name);
        Ok(Outcome::Redirect(crate::models::genre::genre_url(id)))
    }
}
