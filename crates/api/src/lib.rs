//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for employees
//! - Request validation
//! - Mapping of service failures to HTTP responses

pub mod routes;

use std::sync::Arc;

use axum::Router;
use employees_core::employee::EmployeeService;
use employees_db::EmployeeStore;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Employee service backed by the pool.
    pub employees: EmployeeService<EmployeeStore>,
}

impl AppState {
    /// Builds the state around one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let employees = EmployeeService::new(Arc::new(EmployeeStore::new(db.clone())));
        Self {
            db: Arc::new(db),
            employees,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
