//! Storage capability for the students table.
//!
//! Available backends:
//! - `SqliteStudentStore` - file-based SQLite storage
//! - `MemoryStudentStore` - in-memory storage for tests and development

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStudentStore;
pub use sqlite::SqliteStudentStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domains::students::models::{NewStudent, Student, StudentPatch};

/// Errors surfaced by a student store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No student row matches the requested id.
    #[error("no student found with id {id}")]
    NotFound { id: i64 },

    /// Underlying engine failure.
    #[error("query error: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD capability over the students table.
///
/// Handlers consume this as a trait object; one conforming type per backend.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a new student and return the generated id.
    async fn create(&self, new: &NewStudent) -> Result<i64, StoreError>;

    /// Fetch a student by id.
    async fn get(&self, id: i64) -> Result<Student, StoreError>;

    /// Fetch every student, in natural scan order.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Apply a partial update and return the resulting row.
    ///
    /// Fields left empty/zero in the patch are unchanged. An all-empty patch
    /// is a successful no-op returning the current row.
    async fn update(&self, id: i64, patch: &StudentPatch) -> Result<Student, StoreError>;

    /// Delete a student and return the pre-delete snapshot.
    async fn delete(&self, id: i64) -> Result<Student, StoreError>;
}
