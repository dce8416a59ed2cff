//! Repository layer for database operations
//!
//! [`CatalogStore`] is the only way the catalog services reach the store.
//! [`Repository`] implements it on top of a PostgreSQL pool.

pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        BookInstance, BookInstanceData, BookInstanceDetails, BookSummary, BookTitle, Genre,
        GenreData,
    },
};

/// Reads and writes against the catalog store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Lookup under case- and accent-insensitive comparison
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_create(&self, data: &GenreData) -> AppResult<Genre>;
    async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<()>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<()>;

    async fn books_titles(&self) -> AppResult<Vec<BookTitle>>;
    async fn books_in_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>>;

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetails>>;
    async fn book_instances_get_details(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn book_instances_update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<()>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        Repository::genres_list(self).await
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Repository::genres_get(self, id).await
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        Repository::genres_find_by_name(self, name).await
    }

    async fn genres_create(&self, data: &GenreData) -> AppResult<Genre> {
        Repository::genres_create(self, data).await
    }

    async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<()> {
        Repository::genres_update(self, id, data).await
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        Repository::genres_delete(self, id).await
    }

    async fn books_titles(&self) -> AppResult<Vec<BookTitle>> {
        Repository::books_titles(self).await
    }

    async fn books_in_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        Repository::books_in_genre(self, genre_id).await
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetails>> {
        Repository::book_instances_list(self).await
    }

    async fn book_instances_get_details(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>> {
        Repository::book_instances_get_details(self, id).await
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Repository::book_instances_get(self, id).await
    }

    async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        Repository::book_instances_create(self, data).await
    }

    async fn book_instances_update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<()> {
        Repository::book_instances_update(self, id, data).await
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<()> {
        Repository::book_instances_delete(self, id).await
    }
}
