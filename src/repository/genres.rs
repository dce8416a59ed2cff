//! Genre domain methods on Repository

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::genre::{Genre, GenreData},
};

impl Repository {
    /// List all genres sorted by name
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get genre by ID
    pub async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find a genre whose name matches ignoring case and accents
    pub async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name = $1 COLLATE case_insensitive ORDER BY name LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create genre
    pub async fn genres_create(&self, data: &GenreData) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update genre. Updating a missing genre is a no-op.
    pub async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<()> {
        sqlx::query("UPDATE genres SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(&data.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete genre. Deleting a missing genre is a no-op.
    pub async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!("Deleted {} genre row(s) for {}", result.rows_affected(), id);
        Ok(())
    }
}
