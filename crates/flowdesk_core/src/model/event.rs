//! Calendar event record.
//!
//! # Invariants
//! - `date` is a zone-less calendar date; events group by exact date equality.
//! - `time`, when present, is a 24h `HH:mm` string.

use crate::model::id::{generate_id, RecordId};
use crate::model::{validate_identity, Record, ValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time-of-day pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: RecordId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Creates an all-day event with a generated id.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self::with_id(generate_id(), title, date)
    }

    pub fn with_id(id: impl Into<RecordId>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            time: None,
            description: None,
        }
    }
}

impl Record for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identity(&self.id, &self.title)?;
        match self.time.as_deref() {
            Some(time) if !is_time_of_day(time) => Err(ValidationError::InvalidTime(time.to_string())),
            _ => Ok(()),
        }
    }
}

/// Returns whether `value` is a 24h `HH:mm` time.
pub fn is_time_of_day(value: &str) -> bool {
    TIME_OF_DAY.is_match(value)
}
