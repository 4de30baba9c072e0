use actix_web::test;
use league_backend::AppError;

use crate::support::{build_test_state, call_json};

#[actix_web::test]
async fn health_reports_database_and_migrations() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let (status, body) = call_json(&state, test::TestRequest::get().uri("/health")).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_ne!(body["migrations"], "unknown");
    assert!(body["app_version"].is_string());
    assert!(body["queue_size"].is_u64());
    Ok(())
}
