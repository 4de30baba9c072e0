use sea_orm::DatabaseConnection;

use crate::config::market::MarketConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Market tunables (bid window, sweep limit)
    pub market: MarketConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, market: MarketConfig) -> Self {
        Self {
            db: Some(db),
            market,
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(market: MarketConfig) -> Self {
        Self { db: None, market }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
