#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// An exercise as written to the `exercises` table. `date` is `None` for the
/// invalid-date sentinel.
#[derive(Debug, Clone)]
pub struct ExerciseRecord {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: Option<i64>,
    pub date: Option<String>,
}

/// Projection returned by log queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LogRow {
    pub description: String,
    pub duration: Option<i64>,
    pub date: Option<String>,
}
