//! In-memory storage implementation for testing and development.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{StoreError, StudentStore};
use crate::domains::students::models::{NewStudent, Student, StudentPatch};

/// In-memory student store.
///
/// Useful for testing and development. Not suitable for production as data
/// is lost on restart. Ids increase monotonically and are never reused
/// within the store's lifetime.
#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Student>,
    next_id: i64,
}

impl MemoryStudentStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored students.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn create(&self, new: &NewStudent) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        inner.rows.insert(
            id,
            Student {
                id,
                name: new.name.clone(),
                email: new.email.clone(),
                age: new.age,
            },
        );

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Student, StoreError> {
        self.inner
            .read()
            .unwrap()
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.inner.read().unwrap().rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, patch: &StudentPatch) -> Result<Student, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let row = inner.rows.get_mut(&id).ok_or(StoreError::NotFound { id })?;

        if !patch.name.is_empty() {
            row.name = patch.name.clone();
        }
        if !patch.email.is_empty() {
            row.email = patch.email.clone();
        }
        if patch.age != 0 {
            row.age = patch.age;
        }

        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<Student, StoreError> {
        self.inner
            .write()
            .unwrap()
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }
}
