//! Shift domain entity

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::{DomainError, DomainResult};
use crate::shared::time::ensure_window;

/// Published shift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Role tag, e.g. "cashier"
    pub role: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Validated field set for a shift that is about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDraft {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub role: String,
    pub location: String,
}

impl ShiftDraft {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        role: impl Into<String>,
        location: impl Into<String>,
    ) -> DomainResult<Self> {
        let role = role.into().trim().to_string();
        if role.is_empty() {
            return Err(DomainError::InvalidInput("role must not be empty".into()));
        }
        ensure_window(start_time, end_time)?;

        Ok(Self {
            date,
            start_time,
            end_time,
            role,
            location: location.into(),
        })
    }
}

/// Partial update. Only `Some` fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub role: Option<String>,
    pub location: Option<String>,
}

impl ShiftPatch {
    /// Merge onto `current` and validate the result as a whole.
    pub fn apply_to(&self, current: &Shift) -> DomainResult<ShiftDraft> {
        ShiftDraft::new(
            self.date.unwrap_or(current.date),
            self.start_time.unwrap_or(current.start_time),
            self.end_time.unwrap_or(current.end_time),
            self.role.clone().unwrap_or_else(|| current.role.clone()),
            self.location.clone().unwrap_or_else(|| current.location.clone()),
        )
    }
}
