use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use tracing::warn;

/// Execute a closure within a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err` and hands the
/// original error back. Rollback failures are logged, never surfaced.
pub async fn with_txn<C, R, E, F>(conn: &C, f: F) -> Result<R, E>
where
    C: TransactionTrait,
    E: From<DbErr>,
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<R, E>>,
{
    let txn = conn.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
