use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use league_backend::routes;
use league_backend::state::app_state::AppState;
use serde_json::Value;

/// Run one request through the production route table.
pub async fn call(state: &AppState, req: test::TestRequest) -> ServiceResponse<BoxBody> {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

/// Like [`call`], returning the status and the JSON body.
pub async fn call_json(state: &AppState, req: test::TestRequest) -> (u16, Value) {
    let resp = call(state, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
