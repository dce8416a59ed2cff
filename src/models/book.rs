//! Book projections
//!
//! Books are owned elsewhere; this server only reads them to fill selection
//! lists, resolve book copies and list the books of a genre.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Book id and title, used for dropdowns and populated book copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book id, title and summary, used on genre pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}
