//! Data models for the catalog

pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use book::{BookSummary, BookTitle};
pub use book_instance::{
    BookInstance, BookInstanceData, BookInstanceDetails, BookInstanceForm, BookInstanceStatus,
};
pub use genre::{Genre, GenreData, GenreForm};
