// Students API - core
//
// This crate provides a small JSON-over-HTTP CRUD service for the student
// resource, backed by a file-based SQLite store. Handlers consume the
// storage capability through a trait object, so alternative backends
// (in-memory for tests) satisfy the same contract.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
