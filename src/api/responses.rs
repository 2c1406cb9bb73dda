use serde::Serialize;

use crate::db::models::User;
use crate::tracker::{LogEntry, LoggedExercise, UserLog};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

/// `_id` is the owning user's id; exercise ids are never exposed.
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: Option<i64>,
    pub date: String,
}

impl From<LoggedExercise> for ExerciseResponse {
    fn from(logged: LoggedExercise) -> Self {
        Self {
            id: logged.user.id,
            username: logged.user.username,
            description: logged.description,
            duration: logged.duration,
            date: logged.date.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogItem {
    pub description: String,
    pub duration: Option<i64>,
    pub date: String,
}

impl From<LogEntry> for LogItem {
    fn from(entry: LogEntry) -> Self {
        Self {
            description: entry.description,
            duration: entry.duration,
            date: entry.date.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogItem>,
}

impl From<UserLog> for LogResponse {
    fn from(user_log: UserLog) -> Self {
        let count = user_log.count();
        Self {
            id: user_log.user.id,
            username: user_log.user.username,
            count,
            log: user_log.entries.into_iter().map(LogItem::from).collect(),
        }
    }
}
