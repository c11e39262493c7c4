use actix_web::http::header::{AUTHORIZATION, ETAG, LOCATION};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_parts;
use klondike_backend::domain::TableState;
use serde_json::json;

use crate::support::auth::bearer_header;
use crate::support::test_state::{build_test_state, test_security};
use crate::support::{create_test_app, send, send_json};

#[actix_web::test]
async fn create_returns_201_with_etag_and_fresh_deal() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-create", "create@example.com", &test_security()),
        ))
        .set_json(json!({"game": "Klondike", "color": "Red", "draw": "Draw 3"}))
        .to_request();
    let (status, headers, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        headers.get(ETAG).unwrap().to_str()?,
        format!("\"game-{id}-v1\"")
    );
    assert_eq!(
        headers.get(LOCATION).unwrap().to_str()?,
        format!("/api/games/{id}")
    );

    assert_eq!(body["game"], "klondike");
    assert_eq!(body["color"], "red");
    assert_eq!(body["draw"], "Draw 3");
    assert_eq!(body["active"], true);
    assert_eq!(body["won"], false);
    assert_eq!(body["move_count"], 0);
    assert_eq!(body["cards_remaining"], 52);
    assert_eq!(body["version"], 1);
    assert!(body.get("moves").is_none());

    let table: TableState = serde_json::from_value(body["state"].clone())?;
    assert_eq!(table.card_count(), 52);
    assert_eq!(table.stock.len(), 24);
    assert!(table.check_invariants().is_ok());
    Ok(())
}

#[actix_web::test]
async fn draw_defaults_to_one() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-create", "create@example.com", &test_security()),
        ))
        .set_json(json!({"game": "klondike", "color": "blue"}))
        .to_request();
    let (status, _, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["draw"], "Draw 1");
    Ok(())
}

#[actix_web::test]
async fn blank_options_are_400() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-create", "create@example.com", &test_security()),
        ))
        .set_json(json!({"game": "  ", "color": "blue"}))
        .to_request();
    let (status, headers, body) = send(&app, req).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_GAME_OPTIONS",
        StatusCode::BAD_REQUEST,
        Some("variant"),
    );
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_400_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let auth = bearer_header("sub-create", "create@example.com", &test_security());
    let cases = [
        (r#"{"game": "klondike", "color": }"#, "Invalid JSON at line 1"),
        (r#"{"game": "klondike""#, "unexpected end of input"),
        (r#"{"game": "klondike"}"#, "missing field 'color'"),
    ];

    for (payload, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .insert_header((AUTHORIZATION, auth.clone()))
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request();
        let (status, headers, body) = send(&app, req).await;

        assert_problem_details_from_parts(
            status,
            &headers,
            &body,
            "BAD_REQUEST",
            StatusCode::BAD_REQUEST,
            Some(expected),
        );
    }
    Ok(())
}
