//! HTML views
//!
//! Every template is a struct listing all of the values it shows. Pages are
//! rendered inside the shared [`layout`].

pub mod book_instances;
pub mod genres;

use maud::{html, Markup, PreEscaped, DOCTYPE};

pub use book_instances::{
    BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage, BookInstanceListPage,
};
pub use genres::{GenreDeletePage, GenreDetailPage, GenreFormPage, GenreListPage};

use crate::validation::FieldError;

/// A page rendered inside the site layout
pub trait View {
    fn title(&self) -> &str;
    fn content(&self) -> Markup;
}

/// Render a view inside the layout
pub fn render<V: View>(view: &V) -> Markup {
    layout(view.title(), view.content())
}

pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                div.container {
                    nav.sidebar {
                        ul.sidebar-nav {
                            li { a href="/catalog/genres" { "All genres" } }
                            li { a href="/catalog/bookinstances" { "All book-instances" } }
                            li { hr; }
                            li { a href="/catalog/genre/create" { "Create new genre" } }
                            li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                        }
                    }
                    main.content {
                        (content)
                    }
                }
            }
        }
    }
}

/// Text that went through the form pipeline is stored entity-escaped
pub(crate) fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

pub(crate) fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li { (error.message) }
                }
            }
        }
    }
}

/// Generic error page
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
    pub status: u16,
}

impl View for ErrorPage {
    fn title(&self) -> &str {
        "Error"
    }

    fn content(&self) -> Markup {
        html! {
            h1 { (self.message) }
            h2 { (self.status) }
        }
    }
}
