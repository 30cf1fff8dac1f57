mod common;

use axum::{Router, http::StatusCode, middleware};
use axum_test::TestServer;
use is_in_country::api;
use is_in_country::api::middleware::auth;
use serde_json::json;
use sqlx::PgPool;

const TOKEN: &str = "integration-test-token";

async fn make_server(pool: PgPool) -> TestServer {
    common::insert_token(&pool, "tests", TOKEN).await;

    let state = common::create_test_state(pool);
    let writes = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let app = Router::new()
        .nest("/api/v1", api::routes::public_routes().merge(writes))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_countries_list(pool: PgPool) {
    common::insert_country(&pool, "USA", "United States", &common::usa_box()).await;
    common::insert_country(&pool, "CAN", "Canada", &common::canada_box()).await;
    let server = make_server(pool).await;

    let response = server.get("/api/v1/countries").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();

    assert_eq!(json["count"], 2);
    assert_eq!(items[0]["country_code"], "CAN");
    assert_eq!(items[1]["country_code"], "USA");
    assert!(items[0].get("id").is_some());
    assert!(items[0].get("created_at").is_some());
    assert!(items[0].get("polygon_data").is_none());
}

#[sqlx::test]
async fn test_countries_list_empty(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server.get("/api/v1/countries").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 0);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_country_get_is_case_insensitive(pool: PgPool) {
    common::insert_country(&pool, "FRA", "France", &common::rectangle(-5.0, 42.0, 8.0, 52.0)).await;
    let server = make_server(pool).await;

    let response = server.get("/api/v1/countries/fra").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["country_code"], "FRA");
    assert_eq!(json["country_name"], "France");
}

#[sqlx::test]
async fn test_country_get_not_found(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server.get("/api/v1/countries/XYZ").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

// ─── AUTH ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_requires_token(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .json(&json!({
            "country_code": "ISR",
            "country_name": "Israel",
            "polygon_data": common::rectangle(34.2, 29.5, 35.9, 33.4)
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_create_rejects_unknown_token(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer("not-a-real-token"))
        .json(&json!({
            "country_code": "ISR",
            "country_name": "Israel",
            "polygon_data": common::rectangle(34.2, 29.5, 35.9, 33.4)
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_revoked_token_is_rejected(pool: PgPool) {
    let server = make_server(pool.clone()).await;
    common::revoke_token(&pool, "tests").await;

    let response = server
        .delete("/api/v1/countries/USA")
        .add_header("Authorization", bearer(TOKEN))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_reads_do_not_require_token(pool: PgPool) {
    let server = make_server(pool).await;

    server.get("/api/v1/countries").await.assert_status_ok();
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_country(pool: PgPool) {
    let server = make_server(pool.clone()).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({
            "country_code": "isr",
            "country_name": "Israel",
            "polygon_data": common::rectangle(34.2, 29.5, 35.9, 33.4)
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["country_code"], "ISR");

    let stored: String =
        sqlx::query_scalar("SELECT polygon_data FROM countries WHERE country_code = 'ISR'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(stored.contains("Polygon"));
}

#[sqlx::test]
async fn test_create_country_inline_geometry(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({
            "country_code": "JPN",
            "country_name": "Japan",
            "polygon_data": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[130, 31], [132, 31], [132, 34], [130, 34], [130, 31]]],
                    [[[139, 35], [141, 35], [141, 41], [139, 41], [139, 35]]]
                ]
            }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let check = server
        .post("/api/v1/check")
        .json(&json!({"latitude": 35.6762, "longitude": 139.6503, "country_code": "JPN"}))
        .await;
    assert_eq!(check.json::<serde_json::Value>()["is_inside_country"], true);
}

#[sqlx::test]
async fn test_create_country_duplicate(pool: PgPool) {
    common::insert_country(&pool, "USA", "United States", &common::usa_box()).await;
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({
            "country_code": "usa",
            "country_name": "United States",
            "polygon_data": common::usa_box()
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_create_country_invalid_polygon(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({
            "country_code": "BAD",
            "country_name": "Badland",
            "polygon_data": "{\"type\": \"Polygon\", \"coordinates\": [[[0, 0], [1, 1]]]}"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Invalid polygon_data");
}

#[sqlx::test]
async fn test_create_country_invalid_code(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({
            "country_code": "U1",
            "country_name": "Nowhere",
            "polygon_data": common::usa_box()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_create_country_missing_field(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .post("/api/v1/countries")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({"country_code": "ABC", "country_name": "Missing boundary"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_update_country_boundary_changes_answers(pool: PgPool) {
    common::insert_country(&pool, "TST", "Testland", &common::rectangle(0.0, 0.0, 1.0, 1.0)).await;
    let server = make_server(pool).await;

    let check = |server: &TestServer| {
        server
            .post("/api/v1/check")
            .json(&json!({"latitude": 3.0, "longitude": 3.0, "country_code": "TST"}))
    };

    assert_eq!(
        check(&server).await.json::<serde_json::Value>()["is_inside_country"],
        false
    );

    let response = server
        .patch("/api/v1/countries/tst")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({"polygon_data": common::rectangle(0.0, 0.0, 5.0, 5.0)}))
        .await;

    response.assert_status_ok();

    assert_eq!(
        check(&server).await.json::<serde_json::Value>()["is_inside_country"],
        true
    );
}

#[sqlx::test]
async fn test_update_country_name(pool: PgPool) {
    common::insert_country(&pool, "TST", "Testland", &common::rectangle(0.0, 0.0, 1.0, 1.0)).await;
    let server = make_server(pool).await;

    let response = server
        .patch("/api/v1/countries/TST")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({"country_name": "Renamed"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["country_name"], "Renamed");
}

#[sqlx::test]
async fn test_update_country_empty_body(pool: PgPool) {
    common::insert_country(&pool, "TST", "Testland", &common::rectangle(0.0, 0.0, 1.0, 1.0)).await;
    let server = make_server(pool).await;

    let response = server
        .patch("/api/v1/countries/TST")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_update_country_not_found(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .patch("/api/v1/countries/XYZ")
        .add_header("Authorization", bearer(TOKEN))
        .json(&json!({"country_name": "Nowhere"}))
        .await;

    response.assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_country(pool: PgPool) {
    common::insert_country(&pool, "USA", "United States", &common::usa_box()).await;
    let server = make_server(pool).await;

    let response = server
        .delete("/api/v1/countries/usa")
        .add_header("Authorization", bearer(TOKEN))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/v1/countries/USA")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_country_not_found(pool: PgPool) {
    let server = make_server(pool).await;

    let response = server
        .delete("/api/v1/countries/XYZ")
        .add_header("Authorization", bearer(TOKEN))
        .await;

    response.assert_status_not_found();
}
