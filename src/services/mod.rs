//! Catalog services
//!
//! Each service method backs one route and returns either the page to show
//! or the location to redirect to.

pub mod book_instances;
pub mod genres;

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    repository::CatalogStore,
};

/// Result of a form submission
#[derive(Debug)]
pub enum Outcome<V> {
    /// Show the page, typically a form with errors
    Render(V),
    /// Redirect to a location
    Redirect(String),
}

impl<V> Outcome<V> {
    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(location) => Some(location),
            Outcome::Render(_) => None,
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn CatalogStore>,
    pub genres: genres::GenreService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            genres: genres::GenreService::new(store.clone()),
            book_instances: book_instances::BookInstanceService::new(store.clone()),
            store,
        }
    }
}

/// Parse an id submitted in a form field
pub(crate) fn parse_id(value: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id '{}'", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "genre").unwrap(), id);
        assert!(matches!(parse_id("", "genre"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_redirect_location() {
        let outcome: Outcome<()> = Outcome::Redirect("/catalog/genres".to_string());
        assert_eq!(outcome.redirect_location(), Some("/catalog/genres"));
        assert_eq!(Outcome::Render(()).redirect_location(), None);
    }
}
