//! Form validation pipeline
//!
//! Each submitted field runs through an ordered list of steps. Sanitizing steps
//! rewrite the value, checking steps record a [`FieldError`] carrying the
//! field's message. The outcome is a plain [`Validation`] value: the sanitized
//! fields in declaration order plus every error found.

use chrono::{NaiveDate, NaiveTime, Weekday};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use validator::ValidateLength;

/// A single pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Strip surrounding whitespace
    Trim,
    /// Replace HTML special characters with entities
    Escape,
    /// Require at least `n` characters
    MinLength(u64),
    /// Require an ISO-8601 date or date-time, normalized to `YYYY-MM-DD`
    IsoDate,
}

/// Rules for one form field
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    message: &'static str,
    /// Skip every step when the submitted value is empty
    optional: bool,
    steps: Vec<Step>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            message: "Invalid value",
            optional: false,
            steps: Vec::new(),
        }
    }

    pub fn message(mut self, message: &'static str) -> Self {
        self.message = message;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    fn apply(&self, raw: &str, errors: &mut Vec<FieldError>) -> String {
        let mut value = raw.to_string();
        if self.optional && value.is_empty() {
            return value;
        }

        for step in &self.steps {
            match step {
                Step::Trim => value = value.trim().to_string(),
                Step::Escape => value = escape(&value),
                Step::MinLength(min) => {
                    if !value.validate_length(Some(*min), None, None) {
                        errors.push(self.error(&value));
                    }
                }
                Step::IsoDate => match parse_iso_date(&value) {
                    Some(date) => value = date.format("%Y-%m-%d").to_string(),
                    None => errors.push(self.error(&value)),
                },
            }
        }
        value
    }

    fn error(&self, value: &str) -> FieldError {
        FieldError {
            field: self.field,
            message: self.message,
            value: value.to_string(),
        }
    }
}

/// A failed check on a submitted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
    pub value: String,
}

/// Outcome of running a [`Chain`]
#[derive(Debug, Clone, Default)]
pub struct Validation {
    values: IndexMap<&'static str, String>,
    errors: Vec<FieldError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Sanitized value of a field, empty when the field has no rule
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Chain {
    rules: Vec<FieldRule>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Run every rule against the submitted fields. Missing fields count as empty.
    pub fn run(&self, input: &[(&str, &str)]) -> Validation {
        let mut validation = Validation::default();
        for rule in &self.rules {
            let raw = input
                .iter()
                .find(|(name, _)| *name == rule.field)
                .map(|(_, value)| *value)
                .unwrap_or("");
            let value = rule.apply(raw, &mut validation.errors);
            validation.values.insert(rule.field, value);
        }
        validation
    }
}

/// Genre form: name of at least three characters
pub static GENRE_CHAIN: Lazy<Chain> = Lazy::new(|| {
    Chain::new().field(
        FieldRule::new("name")
            .message("Genre name must contain at least 3 characters")
            .step(Step::Trim)
            .step(Step::MinLength(3))
            .step(Step::Escape),
    )
});

/// Book instance form: book and imprint required, optional due date
pub static BOOK_INSTANCE_CHAIN: Lazy<Chain> = Lazy::new(|| {
    Chain::new()
        .field(
            FieldRule::new("book")
                .message("Book must be specified")
                .step(Step::Trim)
                .step(Step::MinLength(1))
                .step(Step::Escape),
        )
        .field(
            FieldRule::new("imprint")
                .message("Imprint must be specified")
                .step(Step::Trim)
                .step(Step::MinLength(1))
                .step(Step::Escape),
        )
        .field(FieldRule::new("status").step(Step::Escape))
        .field(
            FieldRule::new("due_back")
                .message("Invalid date")
                .optional()
                .step(Step::IsoDate),
        )
});

/// HTML entity escaping applied to stored text fields
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse a calendar date from an ISO-8601 date or date-time string.
///
/// Accepts calendar (`2026-10-19`, `20261019`, `2026-10`, `2026`), ordinal
/// (`2026-292`) and week (`2026-W42-1`, `2026-W42`) dates, optionally followed
/// by `T` or a space, a time of day and a `Z` or `±hh[:mm]` offset. The date is
/// taken as written, the offset is only checked.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let (date, time) = match value.find(['T', 't', ' ']) {
        Some(at) => (&value[..at], Some(&value[at + 1..])),
        None => (value, None),
    };
    if let Some(time) = time {
        if !is_iso_time(time) {
            return None;
        }
    }
    parse_date_part(date)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date_part(date: &str) -> Option<NaiveDate> {
    if let Some((year, rest)) = date.split_once('W') {
        let year = year.strip_suffix('-').unwrap_or(year);
        let rest = rest.replace('-', "");
        if year.len() != 4 || !all_digits(year) || !all_digits(&rest) {
            return None;
        }
        let (week, day) = match rest.len() {
            2 => (&rest[..], 1),
            3 => (&rest[..2], rest[2..].parse::<u32>().ok()?),
            _ => return None,
        };
        let weekday = match day {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            7 => Weekday::Sun,
            _ => return None,
        };
        return NaiveDate::from_isoywd_opt(year.parse().ok()?, week.parse().ok()?, weekday);
    }

    let parts: Vec<&str> = date.split('-').collect();
    if !parts.iter().all(|p| all_digits(p)) {
        return None;
    }
    match parts.as_slice() {
        [y] if y.len() == 4 => NaiveDate::from_ymd_opt(y.parse().ok()?, 1, 1),
        [ymd] if ymd.len() == 8 => NaiveDate::from_ymd_opt(
            ymd[..4].parse().ok()?,
            ymd[4..6].parse().ok()?,
            ymd[6..].parse().ok()?,
        ),
        [yd] if yd.len() == 7 => NaiveDate::from_yo_opt(yd[..4].parse().ok()?, yd[4..].parse().ok()?),
        [y, m] if y.len() == 4 && m.len() == 2 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
        }
        [y, o] if y.len() == 4 && o.len() == 3 => NaiveDate::from_yo_opt(y.parse().ok()?, o.parse().ok()?),
        [y, m, d] if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
        }
        _ => None,
    }
}

/// Time of day with an optional zone designator
fn is_iso_time(time: &str) -> bool {
    let local = if let Some(local) = time.strip_suffix(['Z', 'z']) {
        local
    } else if let Some(at) = time.rfind(['+', '-']) {
        if !is_iso_offset(&time[at + 1..]) {
            return false;
        }
        &time[..at]
    } else {
        time
    };

    const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];
    if local.len() == 2 && all_digits(local) {
        return local.parse::<u32>().is_ok_and(|h| h < 24);
    }
    TIME_FORMATS
        .iter()
        .any(|f| NaiveTime::parse_from_str(local, f).is_ok())
}

fn is_iso_offset(offset: &str) -> bool {
    let digits = offset.replacen(':', "", 1);
    if !all_digits(&digits) || !(digits.len() == 2 || digits.len() == 4) {
        return false;
    }
    let hours: u32 = digits[..2].parse().unwrap_or(99);
    let minutes: u32 = digits.get(2..).and_then(|m| m.parse().ok()).unwrap_or(0);
    hours < 24 && minutes < 60 && (offset.len() != 5 || offset.as_bytes()[2] == b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_name_trimmed_and_checked() {
        let v = GENRE_CHAIN.run(&[("name", "  Fantasy  ")]);
        assert!(v.is_valid());
        assert_eq!(v.value("name"), "Fantasy");

        let v = GENRE_CHAIN.run(&[("name", "  ab ")]);
        assert!(!v.is_valid());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()[0].message, "Genre name must contain at least 3 characters");
        assert_eq!(v.value("name"), "ab");
    }

    #[test]
    fn test_genre_name_length_counts_characters() {
        let v = GENRE_CHAIN.run(&[("name", "été")]);
        assert!(v.is_valid());
    }

    #[test]
    fn test_escape_after_length_check() {
        let v = GENRE_CHAIN.run(&[("name", "<b>")]);
        assert!(v.is_valid());
        assert_eq!(v.value("name"), "&lt;b&gt;");
    }

    #[test]
    fn test_escaped_name_outgrows_input() {
        let name = "R&B / Soul & Funk / ".repeat(5);
        let v = GENRE_CHAIN.run(&[("name", name.as_str())]);
        assert!(v.is_valid());
        assert!(name.trim().chars().count() <= 100);
        assert!(v.value("name").chars().count() > 100);
        assert!(v.value("name").starts_with("R&amp;B &#x2F; Soul"));
    }

    #[test]
    fn test_missing_book_and_imprint() {
        let v = BOOK_INSTANCE_CHAIN.run(&[("status", "Available")]);
        let fields: Vec<_> = v.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["book", "imprint"]);
        assert_eq!(v.errors()[0].message, "Book must be specified");
        assert_eq!(v.errors()[1].message, "Imprint must be specified");
    }

    #[test]
    fn test_empty_due_back_is_skipped() {
        let v = BOOK_INSTANCE_CHAIN.run(&[
            ("book", "x"),
            ("imprint", "First Edition"),
            ("status", "Available"),
            ("due_back", ""),
        ]);
        assert!(v.is_valid());
        assert_eq!(v.value("due_back"), "");
    }

    #[test]
    fn test_invalid_due_back() {
        for bad in ["not-a-date", "2026-02-30", "19/10/2026"] {
            let v = BOOK_INSTANCE_CHAIN.run(&[("book", "x"), ("imprint", "y"), ("due_back", bad)]);
            assert_eq!(v.errors().len(), 1, "{}", bad);
            assert_eq!(v.errors()[0].field, "due_back");
            assert_eq!(v.errors()[0].message, "Invalid date");
        }
    }

    #[test]
    fn test_due_back_normalized() {
        let v = BOOK_INSTANCE_CHAIN.run(&[
            ("book", "x"),
            ("imprint", "y"),
            ("due_back", "2026-10-19T08:30:00Z"),
        ]);
        assert!(v.is_valid());
        assert_eq!(v.value("due_back"), "2026-10-19");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2026-10-19"), NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(parse_iso_date("2026-10-19T08:30"), NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(parse_iso_date("tomorrow"), None);
    }

    #[test]
    fn test_parse_iso_date_zones_and_reduced_forms() {
        let oct_19 = NaiveDate::from_ymd_opt(2026, 10, 19);
        assert_eq!(parse_iso_date("2026-10-19T08:30Z"), oct_19);
        assert_eq!(parse_iso_date("2026-10-19T08:30:00+0200"), oct_19);
        assert_eq!(parse_iso_date("2026-10-19T08:30:00.250-05:00"), oct_19);
        assert_eq!(parse_iso_date("2026-10-19 08:30:00"), oct_19);
        assert_eq!(parse_iso_date("20261019"), oct_19);
        assert_eq!(parse_iso_date("2026-10"), NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(parse_iso_date("2026"), NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(parse_iso_date("2026-W42-1"), NaiveDate::from_ymd_opt(2026, 10, 12));
        assert_eq!(parse_iso_date("2026-W42"), NaiveDate::from_ymd_opt(2026, 10, 12));
        assert_eq!(parse_iso_date("2026-292"), oct_19);
    }

    #[test]
    fn test_parse_iso_date_rejects_malformed() {
        for bad in [
            "2026-13",
            "2026-1-5",
            "2026-366",
            "2026-W54-1",
            "2026-W42-8",
            "2026-10-19T25:00",
            "2026-10-19T08:30+2500",
            "2026-10-19T",
            "26-10-19",
        ] {
            assert_eq!(parse_iso_date(bad), None, "{}", bad);
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"O'Reilly & "Sons" / <x>"#), "O&#x27;Reilly &amp; &quot;Sons&quot; &#x2F; &lt;x&gt;");
    }
}
