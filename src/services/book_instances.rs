//! Book instance service

use std::sync::Arc;

use uuid::Uuid;

use super::{parse_id, Outcome};
use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        book_instance_url, BookInstanceData, BookInstanceDeleteForm, BookInstanceForm,
        BookInstanceStatus,
    },
    repository::CatalogStore,
    validation::{parse_iso_date, Validation, BOOK_INSTANCE_CHAIN},
    views::{
        BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage, BookInstanceListPage,
    },
};

pub const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

const FORM_TITLE: &str = "Create BookInstance";

#[derive(Clone)]
pub struct BookInstanceService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstanceService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All book copies with their book
    pub async fn list(&self) -> AppResult<BookInstanceListPage> {
        let bookinstance_list = self.store.book_instances_list().await?;
        Ok(BookInstanceListPage {
            title: "Book Instance List",
            bookinstance_list,
        })
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetailPage> {
        let bookinstance = self
            .store
            .book_instances_get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;

        Ok(BookInstanceDetailPage {
            title: "Book:",
            bookinstance,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookInstanceFormPage> {
        let book_list = self.store.books_titles().await?;
        Ok(BookInstanceFormPage {
            title: FORM_TITLE,
            book_list,
            selected_book: None,
            errors: Vec::new(),
            bookinstance: None,
        })
    }

    pub async fn create(&self, form: &BookInstanceForm) -> AppResult<Outcome<BookInstanceFormPage>> {
        let validation = validate(form);
        if !validation.is_valid() {
            return self.rerender(validation).await.map(Outcome::Render);
        }

        let data = to_data(&validation)?;
        let instance = self.store.book_instances_create(&data).await?;
        tracing::info!("Created book instance {} of book {}", instance.id, instance.book_id);
        Ok(Outcome::Redirect(instance.url()))
    }

    /// Delete confirmation, or back to the list when the copy is gone
    pub async fn delete_form(&self, id: Uuid) -> AppResult<Outcome<BookInstanceDeletePage>> {
        match self.store.book_instances_get_details(id).await? {
            Some(bookinstance) => Ok(Outcome::Render(BookInstanceDeletePage {
                title: "Delete Copy of book",
                bookinstance,
            })),
            None => Ok(Outcome::Redirect(BOOK_INSTANCE_LIST_URL.to_string())),
        }
    }

    /// Delete the copy named by the form. Returns the redirect location.
    pub async fn delete(&self, form: &BookInstanceDeleteForm) -> AppResult<String> {
        let id = parse_id(&form.bookinstanceid, "book instance")?;
        self.store.book_instances_delete(id).await?;
        tracing::info!("Deleted book instance {}", id);
        Ok(BOOK_INSTANCE_LIST_URL.to_string())
    }

    /// Update form pre-filled with the stored copy. The copy may be missing.
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookInstanceFormPage> {
        let (instance, book_list) = tokio::try_join!(
            self.store.book_instances_get(id),
            self.store.books_titles(),
        )?;

        let bookinstance = instance.as_ref().map(BookInstanceForm::from);
        Ok(BookInstanceFormPage {
            title: FORM_TITLE,
            book_list,
            selected_book: bookinstance.as_ref().map(|form| form.book.clone()),
            errors: Vec::new(),
            bookinstance,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: &BookInstanceForm,
    ) -> AppResult<Outcome<BookInstanceFormPage>> {
        let validation = validate(form);
        if !validation.is_valid() {
            return self.rerender(validation).await.map(Outcome::Render);
        }

        let data = to_data(&validation)?;
        self.store.book_instances_update(id, &data).await?;
        tracing::info!("Updated book instance {}", id);
        Ok(Outcome::Redirect(book_instance_url(id)))
    }

    /// Form again with the sanitized submission and its errors
    async fn rerender(&self, validation: Validation) -> AppResult<BookInstanceFormPage> {
        let book_list = self.store.books_titles().await?;
        let bookinstance = BookInstanceForm {
            book: validation.value("book").to_string(),
            imprint: validation.value("imprint").to_string(),
            status: validation.value("status").to_string(),
            due_back: validation.value("due_back").to_string(),
        };

        Ok(BookInstanceFormPage {
            title: FORM_TITLE,
            book_list,
            selected_book: Some(bookinstance.book.clone()),
            errors: validation.into_errors(),
            bookinstance: Some(bookinstance),
        })
    }
}

fn validate(form: &BookInstanceForm) -> Validation {
    BOOK_INSTANCE_CHAIN.run(&[
        ("book", form.book.as_str()),
        ("imprint", form.imprint.as_str()),
        ("status", form.status.as_str()),
        ("due_back", form.due_back.as_str()),
    ])
}

/// Typed fields from a passing validation
fn to_data(validation: &Validation) -> AppResult<BookInstanceData> {
    let book_id = parse_id(validation.value("book"), "book")?;
    let status = validation
        .value("status")
        .parse::<BookInstanceStatus>()
        .map_err(AppError::BadRequest)?;
    let due_back = match validation.value("due_back") {
        "" => None,
        value => Some(
            parse_iso_date(value).ok_or_else(|| AppError::BadRequest("Invalid date".to_string()))?,
        ),
    };

    Ok(BookInstanceData {
        book_id,
        imprint: validation.value("imprint").to_string(),
        status,
        due_back,
    })
}
