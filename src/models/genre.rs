//! Genre model and form payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Genre record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    /// Detail page URL
    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

/// Sanitized genre fields, written on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenreData {
    pub name: String,
}

/// Raw genre form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

/// Genre delete confirmation submission
#[derive(Debug, Clone, Deserialize)]
pub struct GenreDeleteForm {
    #[serde(default)]
    pub genreid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_url() {
        let id = Uuid::nil();
        let genre = Genre { id, name: "Fiction".to_string() };
        assert_eq!(genre.url(), "/catalog/genre/00000000-0000-0000-0000-000000000000");
    }
}
