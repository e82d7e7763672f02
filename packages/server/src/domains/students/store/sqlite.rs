//! SQLite storage backend.
//!
//! A file-based backend suitable for local development and single-server
//! deployments. The schema is created idempotently when the store is built.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

use super::{StoreError, StudentStore};
use crate::domains::students::models::{NewStudent, Student, StudentPatch};

/// SQLite-backed student store.
pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    /// Connect to the given database URL and create the schema if absent.
    ///
    /// # Example URLs
    /// - `sqlite://students.db?mode=rwc` - file-based, create if missing
    /// - `sqlite::memory:` - in-memory database (ephemeral)
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub async fn in_memory() -> Result<Self, StoreError> {
        // A single connection is required: every new `:memory:` connection
        // gets its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create the schema if it does not exist yet.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch(&self, id: i64) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>("SELECT id, name, email, age FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn create(&self, new: &NewStudent) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(&new.name)
            .bind(&new.email)
            .bind(new.age)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> Result<Student, StoreError> {
        self.fetch(id).await
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let students = sqlx::query_as::<_, Student>("SELECT id, name, email, age FROM students")
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    async fn update(&self, id: i64, patch: &StudentPatch) -> Result<Student, StoreError> {
        let current = self.fetch(id).await?;

        if patch.is_empty() {
            tracing::info!(id, "no new data to update");
            return Ok(current);
        }

        // Column names come only from the fixed {name, email, age} set;
        // values are always bound, never interpolated.
        let mut query = QueryBuilder::new("UPDATE students SET ");
        let mut set = query.separated(", ");

        if !patch.name.is_empty() {
            set.push("name = ").push_bind_unseparated(patch.name.as_str());
        }
        if !patch.email.is_empty() {
            set.push("email = ").push_bind_unseparated(patch.email.as_str());
        }
        if patch.age != 0 {
            set.push("age = ").push_bind_unseparated(patch.age);
        }

        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;

        // The row existed a moment ago, so zero rows affected means it was
        // deleted between the fetch and the update.
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> Result<Student, StoreError> {
        let current = self.fetch(id).await?;

        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(current)
    }
}
