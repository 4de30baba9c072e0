//! Administrative market routes: resolve now, sweep, priority queue.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::domain::Subject;
use crate::error::AppError;
use crate::errors::{ErrorCode, ResolutionError};
use crate::repos::priorities::Priority;
use crate::services::resolution::{self, ResolutionOutcome};
use crate::services::{priority, sweep};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum ResolveStatus {
    Resolved,
    AlreadyResolved,
    NothingToDo,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    status: ResolveStatus,
    subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<ResolutionOutcome>,
}

impl ResolveResponse {
    /// `EmptyGroup` is "nothing to do", not a failure.
    fn from_result(
        subject: Subject,
        result: Result<ResolutionOutcome, ResolutionError>,
    ) -> Result<Self, AppError> {
        match result {
            Ok(outcome) => Ok(Self {
                status: if outcome.already_resolved {
                    ResolveStatus::AlreadyResolved
                } else {
                    ResolveStatus::Resolved
                },
                subject,
                outcome: Some(outcome),
            }),
            Err(ResolutionError::EmptyGroup(_)) => Ok(Self {
                status: ResolveStatus::NothingToDo,
                subject,
                outcome: None,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriorityResponse {
    pub team_id: i64,
    pub priority: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_used_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Priority> for PriorityResponse {
    fn from(p: Priority) -> Self {
        Self {
            team_id: p.team_id,
            priority: p.priority,
            last_used_at: p.last_used_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SweepQuery {
    limit: Option<u64>,
}

/// POST /api/admin/market/players/{player_id}/resolve
async fn resolve_player(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = path.into_inner();
    let db = require_db(&app_state)?;

    let result =
        resolution::resolve_player_bids(db, player_id, OffsetDateTime::now_utc()).await;
    let body = ResolveResponse::from_result(Subject::PlayerBids(player_id), result)?;
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/admin/waivers/{waiver_id}/resolve
async fn resolve_waiver(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let waiver_id = path.into_inner();
    let db = require_db(&app_state)?;

    let result = resolution::resolve_waiver(db, waiver_id, OffsetDateTime::now_utc()).await;
    let body = ResolveResponse::from_result(Subject::Waiver(waiver_id), result)?;
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/admin/market/sweep?limit=N
async fn run_sweep(
    query: web::Query<SweepQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(app_state.market.sweep_limit);
    if limit == 0 {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "limit must be at least 1",
        ));
    }
    let db = require_db(&app_state)?;

    let report = sweep::sweep_expired(db, OffsetDateTime::now_utc(), limit).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/admin/priorities
async fn list_priorities(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let queue = priority::list_queue(db).await?;
    let body: Vec<PriorityResponse> = queue.into_iter().map(PriorityResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/admin/priorities/reset
async fn reset_priorities(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let queue = priority::reset_from_standings(db, OffsetDateTime::now_utc()).await?;
    let body: Vec<PriorityResponse> = queue.into_iter().map(PriorityResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/market/players/{player_id}/resolve",
        web::post().to(resolve_player),
    )
    .route("/waivers/{waiver_id}/resolve", web::post().to(resolve_waiver))
    .route("/market/sweep", web::post().to(run_sweep))
    .route("/priorities", web::get().to(list_priorities))
    .route("/priorities/reset", web::post().to(reset_priorities));
}
