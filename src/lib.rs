//! Mantenimiento: equipment maintenance tracker
//!
//! Clients own equipment, equipment accrues a maintenance log, and a paginated
//! PDF report with one QR code per asset can be printed for a client or for
//! the whole fleet. Served as a JSON API plus a small HTML dashboard.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
