use actix_web::test;
use league_backend::AppError;
use serde_json::json;

use crate::common::assert_problem_details;
use crate::support::factory::{
    minutes_ahead, seed_listed_player, seed_rostered_player, seed_team,
};
use crate::support::{build_test_state, call, call_json, db};

#[actix_web::test]
async fn place_and_list_bids() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let team = seed_team(conn, "Bidder").await;
    let player_id = seed_listed_player(conn, None).await;
    let uri = format!("/api/market/players/{player_id}/bids");

    let (status, first) = call_json(
        &state,
        test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "team_id": team, "amount": 75 })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(first["status"], "pending");
    assert_eq!(first["amount"], 75);

    let (status, second) = call_json(
        &state,
        test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({ "team_id": team, "amount": 90 })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, open) = call_json(&state, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, 200);
    let open = open.as_array().cloned().unwrap_or_default();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["id"], second["id"]);
    Ok(())
}

#[actix_web::test]
async fn listing_shows_market_flag() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let player_id = seed_rostered_player(conn, owner).await;

    let (status, body) = call_json(
        &state,
        test::TestRequest::get().uri(&format!("/api/market/players/{player_id}")),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["on_market"], false);
    assert_eq!(body["team_id"], owner);
    Ok(())
}

#[actix_web::test]
async fn bid_errors_map_to_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let bidder = seed_team(conn, "Bidder").await;
    let listed = seed_listed_player(conn, Some(owner)).await;
    let rostered = seed_rostered_player(conn, owner).await;

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri(&format!("/api/market/players/{listed}/bids"))
            .set_json(json!({ "team_id": bidder, "amount": -5 })),
    )
    .await;
    assert_problem_details(resp, 422, "INVALID_BID").await;

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri(&format!("/api/market/players/{rostered}/bids"))
            .set_json(json!({ "team_id": bidder, "amount": 5 })),
    )
    .await;
    assert_problem_details(resp, 422, "PLAYER_NOT_ON_MARKET").await;

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri("/api/market/players/987654/bids")
            .set_json(json!({ "team_id": bidder, "amount": 5 })),
    )
    .await;
    assert_problem_details(resp, 404, "PLAYER_NOT_FOUND").await;

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri(&format!("/api/market/players/{listed}/bids"))
            .set_json(json!({ "team_id": 987654, "amount": 5 })),
    )
    .await;
    assert_problem_details(resp, 404, "TEAM_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn waiver_and_claim_flow() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let conn = db(&state);
    let owner = seed_team(conn, "Owner").await;
    let claimant = seed_team(conn, "Claimant").await;
    let player_id = seed_rostered_player(conn, owner).await;
    let expires_at = minutes_ahead(60)
        .format(&time::format_description::well_known::Rfc3339)
        .expect("format expiry");

    let (status, waiver) = call_json(
        &state,
        test::TestRequest::post()
            .uri("/api/waivers")
            .set_json(json!({ "player_id": player_id, "expires_at": expires_at })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(waiver["from_team_id"], owner);
    let waiver_id = waiver["id"].as_i64().expect("waiver id");

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri("/api/waivers")
            .set_json(json!({ "player_id": player_id, "expires_at": expires_at })),
    )
    .await;
    assert_problem_details(resp, 409, "PLAYER_ON_WAIVERS").await;

    let claims_uri = format!("/api/waivers/{waiver_id}/claims");
    let (status, claim) = call_json(
        &state,
        test::TestRequest::post()
            .uri(&claims_uri)
            .set_json(json!({ "team_id": claimant })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(claim["status"], "pending");
    assert!(claim["amount"].is_null());

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri(&claims_uri)
            .set_json(json!({ "team_id": claimant, "amount": 3 })),
    )
    .await;
    assert_problem_details(resp, 409, "CLAIM_EXISTS").await;

    let resp = call(
        &state,
        test::TestRequest::post()
            .uri(&claims_uri)
            .set_json(json!({ "team_id": owner })),
    )
    .await;
    assert_problem_details(resp, 422, "INVALID_CLAIM").await;
    Ok(())
}
