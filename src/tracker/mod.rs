pub mod dates;
pub mod directory;
pub mod exercise_log;

pub use dates::LogDate;
pub use directory::UserDirectory;
pub use exercise_log::{ExerciseLog, LogEntry, LogQuery, LoggedExercise, NewExercise, UserLog};

use serde::Deserialize;

/// How malformed client input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Coerce bad numbers and dates to sentinels and carry on.
    #[default]
    Lenient,
    /// Reject bad input with a 400.
    Strict,
}

/// A body field that may arrive as any JSON value or as text (form bodies
/// are always text). Nothing a client sends fails to deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl Scalar {
    /// Text rendering for string-typed fields: `5` becomes `"5"`, `2.0`
    /// becomes `"2"`, arrays and objects keep their JSON text.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                (*value as i64).to_string()
            }
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Text(text) => text.clone(),
            Scalar::Other(value) => value.to_string(),
        }
    }

    /// Empty and whitespace-only text counts as absent.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(text) if text.trim().is_empty())
    }

    /// Leading-integer coercion; floats truncate toward zero.
    pub fn to_int_lenient(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Scalar::Float(_) | Scalar::Bool(_) | Scalar::Other(_) => None,
            Scalar::Text(text) => dates::parse_leading_int(text),
        }
    }

    /// Accepts only whole values: `"30"` or `30`, not `"30 min"` or `30.5`.
    pub fn to_int_strict(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Float(value) if value.fract() == 0.0 && value.is_finite() => Some(*value as i64),
            Scalar::Float(_) | Scalar::Bool(_) | Scalar::Other(_) => None,
            Scalar::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Numbers are epoch milliseconds; text goes through the calendar parser.
    /// Booleans, arrays and objects are invalid dates.
    pub fn to_log_date(&self) -> LogDate {
        let millis = match self {
            Scalar::Text(text) => return LogDate::parse(text),
            Scalar::Int(value) => Some(*value),
            Scalar::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Scalar::Float(_) | Scalar::Bool(_) | Scalar::Other(_) => None,
        };

        millis
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map_or(LogDate::Invalid, |dt| {
                LogDate::Valid(dt.with_timezone(&chrono::Local).date_naive())
            })
    }
}
