//! Book instance pages

use maud::{html, Markup};
use uuid::Uuid;

use super::{error_list, stored, View};
use crate::{
    models::{
        book_instance::format_due_back, BookInstanceDetails, BookInstanceForm, BookInstanceStatus,
        BookTitle,
    },
    validation::FieldError,
};

fn status_class(status: BookInstanceStatus) -> &'static str {
    match status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    }
}

pub struct BookInstanceListPage {
    pub title: &'static str,
    pub bookinstance_list: Vec<BookInstanceDetails>,
}

impl View for BookInstanceListPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        html! {
            h1 { (self.title) }
            @if self.bookinstance_list.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for instance in &self.bookinstance_list {
                        li {
                            a href=(instance.url()) { (instance.book.title) " : " (stored(&instance.imprint)) }
                            " - "
                            span class=(status_class(instance.status)) { (instance.status.as_str()) }
                            @if instance.status != BookInstanceStatus::Available {
                                span { " (Due: " (instance.due_back_formatted()) " )" }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub struct BookInstanceDetailPage {
    pub title: &'static str,
    pub bookinstance: BookInstanceDetails,
}

impl View for BookInstanceDetailPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        let instance = &self.bookinstance;
        html! {
            h1 { "ID: " (instance.id.to_string()) }
            p {
                strong { "Title: " }
                a href=(instance.book.url()) { (instance.book.title) }
            }
            p { strong { "Imprint: " } (stored(&instance.imprint)) }
            p {
                strong { "Status: " }
                span class=(status_class(instance.status)) { (instance.status.as_str()) }
            }
            @if instance.status != BookInstanceStatus::Available {
                p { strong { "Due back: " } (instance.due_back_formatted()) }
            }
            hr;
            p { a href=(format!("{}/delete", instance.url())) { "Delete BookInstance" } }
            p { a href=(format!("{}/update", instance.url())) { "Update BookInstance" } }
        }
    }
}

/// Create and update form
pub struct BookInstanceFormPage {
    pub title: &'static str,
    pub book_list: Vec<BookTitle>,
    /// Book to mark as selected in the dropdown
    pub selected_book: Option<String>,
    pub errors: Vec<FieldError>,
    /// Values to pre-fill, already sanitized
    pub bookinstance: Option<BookInstanceForm>,
}

impl BookInstanceFormPage {
    fn is_selected(&self, book_id: Uuid) -> bool {
        self.selected_book
            .as_deref()
            .is_some_and(|selected| selected == book_id.to_string())
    }

    fn selected_status(&self) -> Option<BookInstanceStatus> {
        self.bookinstance
            .as_ref()
            .and_then(|form| form.status.parse().ok())
    }
}

impl View for BookInstanceFormPage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        let imprint = self.bookinstance.as_ref().map(|f| f.imprint.as_str()).unwrap_or("");
        let due_back = self.bookinstance.as_ref().map(|f| f.due_back.as_str()).unwrap_or("");
        let status = self.selected_status().unwrap_or_default();
        html! {
            h1 { (self.title) }
            form method="POST" {
                div.form-group {
                    label for="book" { "Book:" }
                    select.form-control id="book" name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in &self.book_list {
                            option value=(book.id.to_string()) selected[self.is_selected(book.id)] {
                                (book.title)
                            }
                        }
                    }
                }
                div.form-group {
                    label for="imprint" { "Imprint:" }
                    input.form-control id="imprint" type="text"
                        placeholder="Publisher and date information" name="imprint" required
                        value=(stored(imprint));
                }
                div.form-group {
                    label for="due_back" { "Date when book available:" }
                    input.form-control id="due_back" type="date" name="due_back" value=(due_back);
                }
                div.form-group {
                    label for="status" { "Status:" }
                    select.form-control id="status" name="status" required {
                        @for choice in BookInstanceStatus::ALL {
                            option value=(choice.as_str()) selected[choice == status] { (choice.as_str()) }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(&self.errors))
        }
    }
}

/// Delete confirmation
pub struct BookInstanceDeletePage {
    pub title: &'static str,
    pub bookinstance: BookInstanceDetails,
}

impl View for BookInstanceDeletePage {
    fn title(&self) -> &str {
        self.title
    }

    fn content(&self) -> Markup {
        let instance = &self.bookinstance;
        html! {
            h1 { (self.title) ": " (instance.id.to_string()) }
            p { "Do you really want to delete this BookInstance?" }
            div style="margin-left:20px" {
                p {
                    strong { "Title: " }
                    a href=(instance.book.url()) { (instance.book.title) }
                }
                p { strong { "Imprint: " } (stored(&instance.imprint)) }
                p {
                    strong { "Status: " }
                    span class=(status_class(instance.status)) { (instance.status.as_str()) }
                }
                @if instance.status != BookInstanceStatus::Available {
                    p { strong { "Due back: " } (format_due_back(instance.due_back)) }
                }
            }
            form method="POST" {
                div.form-group {
                    input.form-control id="bookinstanceid" type="hidden" name="bookinstanceid"
                        value=(instance.id.to_string());
                }
                button.btn.btn-primary type="submit" { "Delete" }
            }
        }
    }
}
