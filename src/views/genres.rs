//! Genre pages

use maud::{html, Markup};

use super::{error_list, stored, View};
use crate::{
    models::{BookSummary, Genre, GenreForm},
    validation::FieldError,
};

pub struct GenreListPage {
    pub title: &'static str,
    pub genre_list: Vec<Genre>,
}

impl View for GenreListPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        html! {
            h1 { (self.title) }
            @if self.genre_list.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in &self.genre_list {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                }
            }
        }
    }
}

pub struct GenreDetailPage {
    pub title: &'static str,
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

impl View for GenreDetailPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        html! {
            h1 { "Genre: " (stored(&self.genre.name)) }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if self.genre_books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    dl {
                        @for book in &self.genre_books {
                            dt { a href=(book.url()) { (book.title) } }
                            dd { (book.summary) }
                        }
                    }
                }
            }
            hr;
            p { a href=(format!("{}/delete", self.genre.url())) { "Delete genre" } }
            p { a href=(format!("{}/update", self.genre.url())) { "Update genre" } }
        }
    }
}

/// Create and update form
pub struct GenreFormPage {
    pub title: &'static str,
    /// Values to pre-fill, already sanitized
    pub genre: Option<GenreForm>,
    pub errors: Vec<FieldError>,
}

impl View for GenreFormPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        let name = self.genre.as_ref().map(|g| g.name.as_str()).unwrap_or("");
        html! {
            h1 { (self.title) }
            form method="POST" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input.form-control id="name" type="text" placeholder="Fantasy, Poetry etc."
                        name="name" required value=(stored(name));
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&self.errors))
        }
    }
}

/// Delete confirmation. The genre may be missing.
pub struct GenreDeletePage {
    pub title: &'static str,
    pub genre: Option<Genre>,
    pub books: Vec<BookSummary>,
}

impl View for GenreDeletePage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        html! {
            h1 { (self.title) ": " @if let Some(genre) = &self.genre { (stored(&genre.name)) } }
            @if !self.books.is_empty() {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    dl {
                        @for book in &self.books {
                            dt { a href=(book.url()) { (book.title) } }
                            dd { (book.summary) }
                        }
                    }
                }
            } @else if let Some(genre) = &self.genre {
                p { "Do you really want to delete this Genre?" }
                form method="POST" {
                    div.form-group {
                        input.form-control id="genreid" type="hidden" name="genreid" value=(genre.id.to_string());
                    }
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::render;
    use uuid::Uuid;

    fn genre(name: &str) -> Genre {
        Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_list_links_genres() {
        let fiction = genre("Fiction");
        let page = GenreListPage {
            title: "Genre list",
            genre_list: vec![fiction.clone()],
        };
        let html = render(&page).into_string();
        assert!(html.contains(&format!("<a href=\"{}\">Fiction</a>", fiction.url())));
    }

    #[test]
    fn test_stored_names_not_escaped_twice() {
        let page = GenreListPage {
            title: "Genre list",
            genre_list: vec![genre("Science &amp; Nature")],
        };
        let html = render(&page).into_string();
        assert!(html.contains(">Science &amp; Nature</a>"));
    }

    #[test]
    fn test_form_prefill_and_errors() {
        let page = GenreFormPage {
            title: "Create Genre",
            genre: Some(GenreForm { name: "ab".to_string() }),
            errors: vec![FieldError {
                field: "name",
                message: "Genre name must contain at least 3 characters",
                value: "ab".to_string(),
            }],
        };
        let html = render(&page).into_string();
        assert!(html.contains("value=\"ab\""));
        assert!(html.contains("Genre name must contain at least 3 characters"));
    }

    #[test]
    fn test_delete_with_books_hides_form() {
        let page = GenreDeletePage {
            title: "Delete genre",
            genre: Some(genre("Poetry")),
            books: vec![BookSummary {
                id: Uuid::new_v4(),
                title: "Leaves of Grass".to_string(),
                summary: "Poems".to_string(),
            }],
        };
        let html = render(&page).into_string();
        assert!(html.contains("Leaves of Grass"));
        assert!(!html.contains("name=\"genreid\""));
    }

    #[test]
    fn test_delete_without_books_shows_form() {
        let poetry = genre("Poetry");
        let page = GenreDeletePage {
            title: "Delete genre",
            genre: Some(poetry.clone()),
            books: vec![],
        };
        let html = render(&page).into_string();
        assert!(html.contains(&format!("value=\"{}\"", poetry.id)));
    }
}
