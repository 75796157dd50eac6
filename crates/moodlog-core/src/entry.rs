//! Journal entry record, assembly from answers, and record-level validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{JournalError, Result};
use crate::question::Answer;
use crate::table::Value;

/// Hard record bounds. These hold regardless of what the question
/// definitions say, so a misconfigured question bound cannot persist an
/// invalid entry.
pub const MOOD_MIN: i64 = 1;
pub const MOOD_MAX: i64 = 10;
pub const ENERGY_MIN: i64 = 1;
pub const ENERGY_MAX: i64 = 10;
pub const NOTE_MAX_CHARS: usize = 500;

/// One violated record constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Render a violation list for error display.
    pub fn join(violations: &[Violation]) -> String {
        violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// A single mood-journal entry. Immutable once built; appended to the store
/// and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub timestamp: DateTime<Utc>,
    pub mood: i64,
    pub energy: Option<i64>,
    pub note: Option<String>,
    pub tags: Vec<String>,
}

impl Entry {
    /// The entry as one table row, in the store's column layout.
    pub fn to_row(&self) -> Vec<(String, Value)> {
        vec![
            (
                "timestamp".into(),
                Value::Text(self.timestamp.to_rfc3339()),
            ),
            ("mood".into(), Value::Int(self.mood)),
            (
                "energy".into(),
                self.energy.map(Value::Int).unwrap_or(Value::Null),
            ),
            (
                "note".into(),
                self.note.clone().map(Value::Text).unwrap_or(Value::Null),
            ),
            ("tags".into(), Value::List(self.tags.clone())),
        ]
    }
}

/// Unvalidated field set collected from interpreted answers.
///
/// No `Entry` exists until `build` has checked every record constraint and
/// found the full list of violations empty.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub timestamp: Option<DateTime<Utc>>,
    pub mood: Option<i64>,
    pub energy: Option<i64>,
    pub note: Option<String>,
    pub tags: Vec<String>,
}

impl EntryDraft {
    /// Map interpreted answers (keyed by question field) into a draft.
    ///
    /// Unanswered optional questions are simply absent from the map. Fields
    /// outside the record schema are dropped, as are answers whose kind does
    /// not match the field; a missing mood then surfaces as a violation.
    pub fn from_answers(answers: &HashMap<String, Answer>) -> Self {
        let mut draft = Self::default();
        for (field, answer) in answers {
            match (field.as_str(), answer) {
                ("mood", Answer::Int(v)) => draft.mood = Some(*v),
                ("energy", Answer::Int(v)) => draft.energy = Some(*v),
                ("note", Answer::Text(v)) => draft.note = Some(v.clone()),
                ("tags", Answer::Text(v)) => draft.tags = split_tags(v),
                _ => {}
            }
        }
        draft
    }

    /// Check every record constraint, returning all violations at once.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        match self.mood {
            None => violations.push(Violation::new("mood", "is required")),
            Some(v) if !(MOOD_MIN..=MOOD_MAX).contains(&v) => violations.push(Violation::new(
                "mood",
                format!("must be between {} and {}", MOOD_MIN, MOOD_MAX),
            )),
            Some(_) => {}
        }

        if let Some(v) = self.energy {
            if !(ENERGY_MIN..=ENERGY_MAX).contains(&v) {
                violations.push(Violation::new(
                    "energy",
                    format!("must be between {} and {}", ENERGY_MIN, ENERGY_MAX),
                ));
            }
        }

        if let Some(note) = &self.note {
            if note.chars().count() > NOTE_MAX_CHARS {
                violations.push(Violation::new(
                    "note",
                    format!("must be at most {} characters", NOTE_MAX_CHARS),
                ));
            }
        }

        violations
    }

    /// Build the entry, timestamping it now unless the draft sets a time.
    pub fn build(self) -> Result<Entry> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(JournalError::RecordValidation(violations));
        }
        let Some(mood) = self.mood else {
            return Err(JournalError::RecordValidation(vec![Violation::new(
                "mood",
                "is required",
            )]));
        };
        Ok(Entry {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            mood,
            energy: self.energy,
            note: self.note,
            tags: self.tags,
        })
    }
}

/// Split a raw tags answer on commas; order is kept, blanks dropped.
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
