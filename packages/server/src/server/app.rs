//! Application setup and router wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domains::students::StudentStore;
use crate::server::routes::{
    create_student, delete_student, get_student, health_handler, list_students, update_student,
};

/// Shared application state.
///
/// The store capability is constructed once at startup and threaded through
/// the router; handlers never reach for a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
}

/// Build the Axum application router.
pub fn build_app(store: Arc<dyn StudentStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/:id",
            get(get_student).patch(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
