//! Integration tests for the student store backends.
//!
//! The contract tests run against both conforming backends; SQLite-specific
//! behavior (id assignment across deletes) gets its own cases.

use students_core::domains::students::models::{NewStudent, StudentPatch};
use students_core::domains::students::store::{
    MemoryStudentStore, SqliteStudentStore, StoreError, StudentStore,
};

fn new_student(name: &str, email: &str, age: i64) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: email.to_string(),
        age,
    }
}

/// Exercise the full CRUD contract against any backend.
async fn exercise_crud_contract(store: &dyn StudentStore) {
    // Empty store lists cleanly
    let all = store.list().await.unwrap();
    assert!(all.is_empty());

    // Missing ids are a distinguished not-found, never a silent zero row
    let err = store.get(42).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42 }));

    // Create returns increasing, previously-unused ids
    let first = store.create(&new_student("Ann", "ann@x.com", 21)).await.unwrap();
    let second = store.create(&new_student("Bob", "bob@x.com", 34)).await.unwrap();
    assert!(second > first);

    // Round trip
    let ann = store.get(first).await.unwrap();
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.email, "ann@x.com");
    assert_eq!(ann.age, 21);

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);

    // Patching only the email leaves name and age untouched
    let patch = StudentPatch {
        email: "ann@y.org".to_string(),
        ..Default::default()
    };
    let updated = store.update(first, &patch).await.unwrap();
    assert_eq!(updated.name, "Ann");
    assert_eq!(updated.email, "ann@y.org");
    assert_eq!(updated.age, 21);

    // An empty patch is a successful no-op
    let unchanged = store.update(first, &StudentPatch::default()).await.unwrap();
    assert_eq!(unchanged, updated);

    // Patching a missing id propagates not-found
    let err = store.update(999, &patch).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 999 }));

    // Delete returns the pre-delete snapshot
    let snapshot = store.delete(first).await.unwrap();
    assert_eq!(snapshot, unchanged);

    let err = store.get(first).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let err = store.delete(first).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    // The other row is untouched
    let bob = store.get(second).await.unwrap();
    assert_eq!(bob.name, "Bob");
}

#[tokio::test]
async fn sqlite_backend_honors_crud_contract() {
    let store = SqliteStudentStore::in_memory().await.unwrap();
    exercise_crud_contract(&store).await;
}

#[tokio::test]
async fn memory_backend_honors_crud_contract() {
    let store = MemoryStudentStore::new();
    exercise_crud_contract(&store).await;
}

#[tokio::test]
async fn sqlite_never_reuses_ids_after_delete() {
    let store = SqliteStudentStore::in_memory().await.unwrap();

    let first = store.create(&new_student("Ann", "ann@x.com", 21)).await.unwrap();
    store.delete(first).await.unwrap();

    let second = store.create(&new_student("Bob", "bob@x.com", 34)).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn sqlite_patch_updates_multiple_fields_at_once() {
    let store = SqliteStudentStore::in_memory().await.unwrap();
    let id = store.create(&new_student("Ann", "ann@x.com", 21)).await.unwrap();

    let patch = StudentPatch {
        name: "Anna".to_string(),
        email: "anna@x.com".to_string(),
        age: 22,
    };
    let updated = store.update(id, &patch).await.unwrap();

    assert_eq!(updated.name, "Anna");
    assert_eq!(updated.email, "anna@x.com");
    assert_eq!(updated.age, 22);

    // The stored row matches what update returned
    let fetched = store.get(id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn sqlite_schema_creation_is_idempotent() {
    // Building two stores against the same URL must not fail on the second
    // CREATE TABLE.
    let store = SqliteStudentStore::in_memory().await.unwrap();
    sqlx::query("CREATE TABLE IF NOT EXISTS students (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, email TEXT NOT NULL, age INTEGER NOT NULL)")
        .execute(store.pool())
        .await
        .unwrap();

    let id = store.create(&new_student("Ann", "ann@x.com", 21)).await.unwrap();
    assert!(id > 0);
}

#[tokio::test]
async fn duplicate_emails_are_permitted() {
    let store = SqliteStudentStore::in_memory().await.unwrap();

    store.create(&new_student("Ann", "same@x.com", 21)).await.unwrap();
    store.create(&new_student("Bob", "same@x.com", 34)).await.unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
