use actix_web::test;
use league_backend::AppError;
use serde_json::json;

use crate::common::assert_problem_details;
use crate::support::factory::seed_listed_player;
use crate::support::{build_test_state, call, db};

// Malformed bodies come back as problem details, not actix's plain text.
#[actix_web::test]
async fn malformed_json_is_a_bad_request() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let player_id = seed_listed_player(db(&state), None).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/market/players/{player_id}/bids"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"team_id\": ");
    let resp = call(&state, req).await;
    assert_problem_details(resp, 400, "BAD_REQUEST").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/market/players/{player_id}/bids"))
        .set_json(json!({ "team_id": "seven", "amount": 10 }));
    let resp = call(&state, req).await;
    assert_problem_details(resp, 400, "BAD_REQUEST").await;
    Ok(())
}

#[actix_web::test]
async fn titles_are_humanized_codes() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let resp = call(
        &state,
        test::TestRequest::get().uri("/api/market/players/424242"),
    )
    .await;
    let body = assert_problem_details(resp, 404, "PLAYER_NOT_FOUND").await;
    assert_eq!(body["title"], "Player Not Found");
    assert!(body["detail"].as_str().unwrap_or_default().contains("424242"));
    Ok(())
}
