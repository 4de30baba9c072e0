use std::env;

use time::Duration;

use crate::error::AppError;

const DEFAULT_BID_WINDOW_HOURS: i64 = 24;
const MAX_BID_WINDOW_HOURS: i64 = 24 * 365;
const DEFAULT_SWEEP_LIMIT: u64 = 200;

/// Tunables for the transfer market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketConfig {
    /// Expiry applied to a bid when the caller does not supply one
    pub bid_window: Duration,
    /// Maximum subjects of each kind resolved by one sweep
    pub sweep_limit: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            bid_window: Duration::hours(DEFAULT_BID_WINDOW_HOURS),
            sweep_limit: DEFAULT_SWEEP_LIMIT,
        }
    }
}

impl MarketConfig {
    /// Read `MARKET_BID_WINDOW_HOURS` and `MARKET_SWEEP_LIMIT`, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let bid_window = match optional_var("MARKET_BID_WINDOW_HOURS")? {
            Some(raw) => {
                let hours: i64 = raw.parse().map_err(|_| {
                    AppError::config(format!("MARKET_BID_WINDOW_HOURS must be an integer, got '{raw}'"))
                })?;
                if !(1..=MAX_BID_WINDOW_HOURS).contains(&hours) {
                    return Err(AppError::config(format!(
                        "MARKET_BID_WINDOW_HOURS must be between 1 and {MAX_BID_WINDOW_HOURS}, got {hours}"
                    )));
                }
                Duration::hours(hours)
            }
            None => defaults.bid_window,
        };

        let sweep_limit = match optional_var("MARKET_SWEEP_LIMIT")? {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::config(format!("MARKET_SWEEP_LIMIT must be an integer, got '{raw}'"))
            })?,
            None => defaults.sweep_limit,
        };

        Ok(Self {
            bid_window,
            sweep_limit,
        })
    }
}

fn optional_var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::config(format!("failed to read {name}: {e}"))),
    }
}
