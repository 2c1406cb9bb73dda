use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::{ExerciseRecord, LogRow, User};

/// Filter for `find_exercises`. Date bounds are in storage form; a `None`
/// inside `Some` binds NULL, which no row satisfies.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub user_id: String,
    pub from: Option<Option<String>>,
    pub to: Option<Option<String>>,
    pub limit: Option<i64>,
}

pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exercises (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            description TEXT NOT NULL,
            duration INTEGER,
            date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_user_date ON exercises(user_id, date)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn insert_user(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
        .bind(&user.id)
        .bind(&user.username)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY rowid")
        .fetch_all(pool)
        .await
}

pub async fn find_user(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_exercise(pool: &SqlitePool, exercise: &ExerciseRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO exercises (id, user_id, description, duration, date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&exercise.id)
    .bind(&exercise.user_id)
    .bind(&exercise.description)
    .bind(exercise.duration)
    .bind(&exercise.date)
    .execute(pool)
    .await?;

    Ok(())
}

/// Matching entries in insertion order. `LIMIT` is evaluated after `WHERE`,
/// so the cap applies to the filtered set.
pub async fn find_exercises(pool: &SqlitePool, filter: &ExerciseFilter) -> Result<Vec<LogRow>, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT description, duration, date FROM exercises WHERE user_id = ");
    query.push_bind(filter.user_id.clone());

    if let Some(from) = &filter.from {
        query.push(" AND date >= ").push_bind(from.clone());
    }
    if let Some(to) = &filter.to {
        query.push(" AND date <= ").push_bind(to.clone());
    }

    query.push(" ORDER BY rowid");

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(limit);
    }

    query.build_query_as::<LogRow>().fetch_all(pool).await
}
