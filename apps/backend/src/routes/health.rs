use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::repos::priorities;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    /// Teams holding a waiver priority; absent when the database is down.
    #[serde(skip_serializing_if = "Option::is_none")]
    queue_size: Option<usize>,
    time: String,
}

struct DbProbe {
    error: Option<String>,
    migrations: String,
    queue_size: Option<usize>,
}

async fn probe(db: &DatabaseConnection) -> DbProbe {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    if let Err(e) = db.query_one(ping).await {
        return DbProbe {
            error: Some(format!("DB query failed: {e}")),
            migrations: "unknown".to_string(),
            queue_size: None,
        };
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    let queue_size = priorities::list(db).await.ok().map(|rows| rows.len());

    DbProbe {
        error: None,
        migrations,
        queue_size,
    }
}

/// GET /health. Always 200; the body says whether the database answered.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let probe = match require_db(&app_state) {
        Ok(db) => probe(db).await,
        Err(e) => DbProbe {
            error: Some(format!("DB unavailable: {e}")),
            migrations: "unknown".to_string(),
            queue_size: None,
        },
    };

    let response = HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: if probe.error.is_none() { "ok" } else { "error" },
        db_error: probe.error,
        migrations: probe.migrations,
        queue_size: probe.queue_size,
        time: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
