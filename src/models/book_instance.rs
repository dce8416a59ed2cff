//! Book instance (physical copy of a book) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::book::BookTitle;

/// Availability of a book copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for BookInstanceStatus {
    fn default() -> Self {
        BookInstanceStatus::Maintenance
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookInstanceStatus::Available),
            "Maintenance" => Ok(BookInstanceStatus::Maintenance),
            "Loaned" => Ok(BookInstanceStatus::Loaned),
            "Reserved" => Ok(BookInstanceStatus::Reserved),
            other => Err(format!("Unknown book copy status '{}'", other)),
        }
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Book instance as stored, with an unresolved book reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

/// Book instance with its book resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceDetails {
    pub id: Uuid,
    pub book: BookTitle,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDetails {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_due_back(self.due_back)
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// Medium date format, e.g. `Oct 19, 2026`. Empty when no date is set.
pub fn format_due_back(due_back: Option<NaiveDate>) -> String {
    due_back
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Sanitized book instance fields, written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceData {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Raw book instance form submission, also used to pre-fill the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            // ISO date for the date input
            due_back: instance
                .due_back
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Book instance delete confirmation submission
#[derive(Debug, Clone, Deserialize)]
pub struct BookInstanceDeleteForm {
    #[serde(default)]
    pub bookinstanceid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("Loaned".parse::<BookInstanceStatus>(), Ok(BookInstanceStatus::Loaned));
        assert!("loaned".parse::<BookInstanceStatus>().is_err());
        assert!("".parse::<BookInstanceStatus>().is_err());
    }

    #[test]
    fn test_format_due_back() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 9);
        assert_eq!(format_due_back(date), "Oct 9, 2026");
        assert_eq!(format_due_back(None), "");
    }

    #[test]
    fn test_form_prefill() {
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book_id: Uuid::nil(),
            imprint: "First Edition".to_string(),
            status: BookInstanceStatus::Available,
            due_back: NaiveDate::from_ymd_opt(2026, 1, 5),
        };
        let form = BookInstanceForm::from(&instance);
        assert_eq!(form.book, Uuid::nil().to_string());
        assert_eq!(form.status, "Available");
        assert_eq!(form.due_back, "2026-01-05");
    }
}
