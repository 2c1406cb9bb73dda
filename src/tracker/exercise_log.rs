use uuid::Uuid;

use crate::db::{
    Store,
    models::{ExerciseRecord, LogRow, User},
    repo::{self, ExerciseFilter},
};
use crate::error::AppError;
use crate::tracker::{InputPolicy, LogDate, Scalar, UserDirectory, dates};

/// Exercise fields as received from a client, before coercion.
#[derive(Debug, Clone, Default)]
pub struct NewExercise {
    pub description: Option<String>,
    pub duration: Option<Scalar>,
    pub date: Option<Scalar>,
}

/// Log query parameters as received from a client. Empty strings count as
/// absent.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// The stored exercise viewed as belonging to its user.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedExercise {
    pub user: User,
    pub description: String,
    pub duration: Option<i64>,
    pub date: LogDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub description: String,
    pub duration: Option<i64>,
    pub date: LogDate,
}

impl From<LogRow> for LogEntry {
    fn from(row: LogRow) -> Self {
        Self {
            date: LogDate::from_storage(row.date.as_deref()),
            description: row.description,
            duration: row.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserLog {
    pub user: User,
    pub entries: Vec<LogEntry>,
}

impl UserLog {
    /// Number of entries returned, after any limit.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Appends and queries exercises. Every operation first resolves the owning
/// user through the directory.
#[derive(Clone)]
pub struct ExerciseLog {
    store: Store,
    directory: UserDirectory,
    policy: InputPolicy,
}

impl ExerciseLog {
    pub fn new(store: Store, directory: UserDirectory, policy: InputPolicy) -> Self {
        Self {
            store,
            directory,
            policy,
        }
    }

    // The existence check and the insert are not transactional. Nothing
    // deletes users, so the window cannot orphan an entry today.
    pub async fn append(&self, user_id: &str, input: NewExercise) -> Result<LoggedExercise, AppError> {
        let user = self.directory.require(user_id).await?;

        let description = input.description.unwrap_or_default();
        if self.strict() && description.trim().is_empty() {
            return Err(invalid("description is required"));
        }

        let duration = self.coerce_duration(input.duration.as_ref())?;
        let date = self.coerce_date(input.date.as_ref())?;

        let record = ExerciseRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            description,
            duration,
            date: date.to_storage(),
        };
        repo::insert_exercise(self.store.pool(), &record).await?;

        tracing::info!(user_id = %user.id, exercise_id = %record.id, "logged exercise");

        Ok(LoggedExercise {
            user,
            description: record.description,
            duration,
            date,
        })
    }

    pub async fn query(&self, user_id: &str, params: LogQuery) -> Result<UserLog, AppError> {
        let user = self.directory.require(user_id).await?;

        let filter = ExerciseFilter {
            user_id: user.id.clone(),
            from: self.coerce_bound("from", params.from.as_deref())?,
            to: self.coerce_bound("to", params.to.as_deref())?,
            limit: self.coerce_limit(params.limit.as_deref())?,
        };

        let rows = repo::find_exercises(self.store.pool(), &filter).await?;
        tracing::debug!(user_id = %user.id, returned = rows.len(), "queried exercise log");

        Ok(UserLog {
            user,
            entries: rows.into_iter().map(LogEntry::from).collect(),
        })
    }

    fn strict(&self) -> bool {
        self.policy == InputPolicy::Strict
    }

    fn coerce_duration(&self, raw: Option<&Scalar>) -> Result<Option<i64>, AppError> {
        if !self.strict() {
            return Ok(raw.and_then(Scalar::to_int_lenient));
        }

        raw.and_then(Scalar::to_int_strict)
            .map(Some)
            .ok_or_else(|| invalid("duration must be an integer"))
    }

    fn coerce_date(&self, raw: Option<&Scalar>) -> Result<LogDate, AppError> {
        let date = match raw.filter(|scalar| !scalar.is_blank()) {
            None => return Ok(LogDate::today()),
            Some(scalar) => scalar.to_log_date(),
        };

        if self.strict() && !date.is_valid() {
            return Err(invalid("date is not a valid date"));
        }
        Ok(date)
    }

    /// An unparseable bound stays in the filter as NULL and matches nothing.
    fn coerce_bound(&self, name: &str, raw: Option<&str>) -> Result<Option<Option<String>>, AppError> {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        let date = LogDate::parse(raw);
        if self.strict() && !date.is_valid() {
            return Err(invalid(&format!("{name} is not a valid date")));
        }
        Ok(Some(date.to_storage()))
    }

    /// Zero means no cap under either policy. Lenient: unparseable also means
    /// no cap and negatives use their magnitude.
    fn coerce_limit(&self, raw: Option<&str>) -> Result<Option<i64>, AppError> {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        if self.strict() {
            return match raw.trim().parse::<i64>() {
                Ok(0) => Ok(None),
                Ok(limit) if limit > 0 => Ok(Some(limit)),
                _ => Err(invalid("limit must be a non-negative integer")),
            };
        }

        Ok(dates::parse_leading_int(raw)
            .and_then(i64::checked_abs)
            .filter(|limit| *limit > 0))
    }
}

fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}
