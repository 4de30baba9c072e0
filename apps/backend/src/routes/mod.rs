use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod admin;
pub mod health;
pub mod market;

/// JSON body errors rendered as problem details instead of plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    })
}

/// Register every route. Used by `main.rs` and by integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    // Health check: /health
    health::configure_routes(cfg);

    // Admin routes: /api/admin/**
    cfg.service(web::scope("/api/admin").configure(admin::configure_routes));

    // Market routes: /api/market/**
    cfg.service(web::scope("/api/market").configure(market::configure_market_routes));

    // Waiver routes: /api/waivers/**
    cfg.service(web::scope("/api/waivers").configure(market::configure_waiver_routes));
}
