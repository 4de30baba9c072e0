//! Public market routes: bids on listed players and waiver claims.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::repos::bids::Bid;
use crate::repos::players::Player;
use crate::repos::waivers::{Waiver, WaiverClaim};
use crate::services::market::{self, PlaceBid};
use crate::services::waivers;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PlaceBidRequest {
    team_id: i64,
    amount: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    expires_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
struct OpenWaiverRequest {
    player_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
struct SubmitClaimRequest {
    team_id: i64,
    #[serde(default)]
    amount: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub id: i64,
    pub player_id: i64,
    pub team_id: i64,
    pub amount: i64,
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.id,
            player_id: bid.player_id,
            team_id: bid.team_id,
            amount: bid.amount,
            status: bid.status.as_str(),
            expires_at: bid.expires_at,
            created_at: bid.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: i64,
    pub name: String,
    pub team_id: Option<i64>,
    pub on_market: bool,
}

impl From<Player> for ListingResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            team_id: player.team_id,
            on_market: player.on_market,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WaiverResponse {
    pub id: i64,
    pub player_id: i64,
    pub from_team_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl From<Waiver> for WaiverResponse {
    fn from(waiver: Waiver) -> Self {
        Self {
            id: waiver.id,
            player_id: waiver.player_id,
            from_team_id: waiver.from_team_id,
            expires_at: waiver.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub waiver_id: i64,
    pub team_id: i64,
    pub amount: Option<i64>,
    pub status: &'static str,
}

impl From<WaiverClaim> for ClaimResponse {
    fn from(claim: WaiverClaim) -> Self {
        Self {
            id: claim.id,
            waiver_id: claim.waiver_id,
            team_id: claim.team_id,
            amount: claim.amount,
            status: claim.status.as_str(),
        }
    }
}

/// GET /api/market/players/{player_id}
async fn get_listing(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let player = market::list_player_listing(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ListingResponse::from(player)))
}

/// POST /api/market/players/{player_id}/bids
async fn place_bid(
    path: web::Path<i64>,
    body: web::Json<PlaceBidRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();
    let req = PlaceBid {
        player_id: path.into_inner(),
        team_id: body.team_id,
        amount: body.amount,
        expires_at: body.expires_at,
    };

    let bid = market::place_bid(db, &app_state.market, req, OffsetDateTime::now_utc()).await?;
    Ok(HttpResponse::Created().json(BidResponse::from(bid)))
}

/// GET /api/market/players/{player_id}/bids
async fn list_bids(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let bids = market::list_open_bids(db, path.into_inner()).await?;
    let body: Vec<BidResponse> = bids.into_iter().map(BidResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/waivers
async fn open_waiver(
    body: web::Json<OpenWaiverRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let waiver = waivers::open_waiver(db, body.player_id, body.expires_at).await?;
    Ok(HttpResponse::Created().json(WaiverResponse::from(waiver)))
}

/// POST /api/waivers/{waiver_id}/claims
async fn submit_claim(
    path: web::Path<i64>,
    body: web::Json<SubmitClaimRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let claim = waivers::submit_claim(db, path.into_inner(), body.team_id, body.amount).await?;
    Ok(HttpResponse::Created().json(ClaimResponse::from(claim)))
}

pub fn configure_market_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/players/{player_id}", web::get().to(get_listing))
        .service(
            web::resource("/players/{player_id}/bids")
                .route(web::post().to(place_bid))
                .route(web::get().to(list_bids)),
        );
}

pub fn configure_waiver_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(open_waiver))
        .route("/{waiver_id}/claims", web::post().to(submit_claim));
}
