pub mod models;
pub mod store;

pub use models::{NewStudent, Student, StudentPatch, ValidationErrors};
pub use store::{MemoryStudentStore, SqliteStudentStore, StoreError, StudentStore};
