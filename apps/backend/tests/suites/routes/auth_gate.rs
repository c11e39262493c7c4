use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_parts;
use klondike_backend::state::security_config::SecurityConfig;

use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::test_state::{build_test_state, test_security};
use crate::support::{create_test_app, send};

#[actix_web::test]
async fn missing_bearer_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/games/1").to_request();
    let (status, headers, body) = send(&app, req).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    );
    assert_eq!(headers.get("www-authenticate").unwrap(), "Bearer");
    Ok(())
}

#[actix_web::test]
async fn expired_token_is_401_expired() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let token = mint_expired_token("sub-expired", "late@example.com", &test_security());
    let req = test::TestRequest::get()
        .uri("/api/games/1")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let (status, headers, body) = send(&app, req).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "UNAUTHORIZED_EXPIRED_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    );
    Ok(())
}

#[actix_web::test]
async fn foreign_signature_is_401_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let other = SecurityConfig::new("some-other-secret");
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, bearer_header("sub-x", "x@example.com", &other)))
        .set_json(serde_json::json!({"game": "klondike", "color": "red"}))
        .to_request();
    let (status, headers, body) = send(&app, req).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    );
    Ok(())
}

#[actix_web::test]
async fn non_bearer_scheme_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/games/1")
        .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
        .to_request();
    let (status, headers, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.contains_key("x-trace-id"));
    Ok(())
}
