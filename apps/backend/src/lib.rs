#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use config::db::{db_url, DbKind, RuntimeEnv};
pub use config::market::MarketConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode, ResolutionError};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use services::resolution::ResolutionOutcome;
pub use services::sweep::SweepReport;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
