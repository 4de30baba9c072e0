//! Resolve every subject whose bids or claims have expired.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::domain::Subject;
use crate::errors::domain::DomainError;
use crate::errors::ResolutionError;
use crate::repos::{bids, waivers};
use crate::services::resolution::{self, ResolutionOutcome};

/// Counts from one sweep run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Resolved, including idempotent replays.
    pub processed: usize,
    /// Resolutions that had to repair a priority row.
    pub fixed: usize,
    /// Nothing pending any more.
    pub skipped: usize,
    pub errored: usize,
    pub errors: Vec<String>,
}

impl SweepReport {
    fn record(&mut self, subject: Subject, result: Result<ResolutionOutcome, ResolutionError>) {
        match result {
            Ok(outcome) => {
                self.processed += 1;
                if !outcome.repaired_teams.is_empty() {
                    self.fixed += 1;
                }
            }
            Err(ResolutionError::EmptyGroup(_)) => self.skipped += 1,
            Err(e) => {
                warn!(%subject, error = %e, "Sweep failed to resolve subject");
                self.errored += 1;
                self.errors.push(format!("{subject}: {e}"));
            }
        }
    }
}

/// Find due players and waivers (at most `limit` of each) and resolve each
/// in its own transaction. A failure on one subject does not stop the run.
pub async fn sweep_expired(
    conn: &DatabaseConnection,
    now: OffsetDateTime,
    limit: u64,
) -> Result<SweepReport, DomainError> {
    let player_ids = bids::find_due_player_ids(conn, now, limit).await?;
    let waiver_ids = waivers::find_due_waiver_ids(conn, now, limit).await?;

    let mut report = SweepReport::default();
    for player_id in player_ids {
        let result = resolution::resolve_player_bids(conn, player_id, now).await;
        report.record(Subject::PlayerBids(player_id), result);
    }
    for waiver_id in waiver_ids {
        let result = resolution::resolve_waiver(conn, waiver_id, now).await;
        report.record(Subject::Waiver(waiver_id), result);
    }

    info!(
        processed = report.processed,
        fixed = report.fixed,
        skipped = report.skipped,
        errored = report.errored,
        "Sweep finished"
    );
    Ok(report)
}
