//! Book instance domain methods on Repository

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceData, BookInstanceDetails, BookInstanceStatus},
    },
};

/// Book instance joined with its book
#[derive(Debug, FromRow)]
struct PopulatedRow {
    id: Uuid,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
    book_id: Uuid,
    book_title: String,
}

impl TryFrom<PopulatedRow> for BookInstanceDetails {
    type Error = AppError;

    fn try_from(row: PopulatedRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookInstanceStatus>()
            .map_err(AppError::Internal)?;
        Ok(Self {
            id: row.id,
            book: BookTitle {
                id: row.book_id,
                title: row.book_title,
            },
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        })
    }
}

const POPULATED_SELECT: &str = r#"
    SELECT bi.id, bi.imprint, bi.status, bi.due_back,
           b.id AS book_id, b.title AS book_title
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

impl Repository {
    /// List all book instances with their book
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetails>> {
        let query = format!("{} ORDER BY b.title, bi.imprint", POPULATED_SELECT);
        sqlx::query_as::<_, PopulatedRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(BookInstanceDetails::try_from)
            .collect()
    }

    /// Get book instance with its book
    pub async fn book_instances_get_details(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>> {
        let query = format!("{} WHERE bi.id = $1", POPULATED_SELECT);
        sqlx::query_as::<_, PopulatedRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstanceDetails::try_from)
            .transpose()
    }

    /// Get book instance without resolving the book
    pub async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create book instance
    pub async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite book instance fields. Updating a missing instance is a no-op.
    pub async fn book_instances_update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete book instance. Deleting a missing instance is a no-op.
    pub async fn book_instances_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!("Deleted {} book instance row(s) for {}", result.rows_affected(), id);
        Ok(())
    }
}
