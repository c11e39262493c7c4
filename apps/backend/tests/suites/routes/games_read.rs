use actix_web::http::header::{AUTHORIZATION, ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_parts;

use crate::support::auth::bearer_header;
use crate::support::games::create_game;
use crate::support::test_state::{build_test_state, test_security};
use crate::support::{create_test_app, send, send_json};

#[actix_web::test]
async fn get_returns_game_with_etag() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-owner", "Draw 1").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-owner", "owner@example.com", &test_security()),
        ))
        .to_request();
    let (status, headers, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(ETAG).unwrap().to_str()?,
        format!("\"game-{}-v1\"", game.id)
    );
    assert_eq!(body["id"], game.id);
    assert_eq!(body["version"], 1);
    assert!(body.get("moves").is_none());
    Ok(())
}

#[actix_web::test]
async fn any_signed_in_user_may_read() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-owner", "Draw 1").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-watcher", "watcher@example.com", &test_security()),
        ))
        .to_request();
    let (status, _, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn matching_if_none_match_is_304() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-owner", "Draw 1").await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let auth = bearer_header("sub-owner", "owner@example.com", &test_security());

    let etag = format!("\"game-{}-v1\"", game.id);
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((AUTHORIZATION, auth.clone()))
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let (status, headers, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::NOT_MODIFIED);
    assert_eq!(headers.get(ETAG).unwrap().to_str()?, etag);
    assert!(body.is_empty());

    let stale = format!("\"game-{}-v0\"", game.id);
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header((AUTHORIZATION, auth))
        .insert_header((IF_NONE_MATCH, stale))
        .to_request();
    let (status, _, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn moves_query_includes_the_log() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-owner", "Draw 1").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}?moves", game.id))
        .insert_header((
            AUTHORIZATION,
            bearer_header("sub-owner", "owner@example.com", &test_security()),
        ))
        .to_request();
    let (status, _, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moves"], serde_json::json!([]));
    Ok(())
}

#[actix_web::test]
async fn unknown_and_invalid_ids() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let auth = bearer_header("sub-owner", "owner@example.com", &test_security());

    let req = test::TestRequest::get()
        .uri("/api/games/987654")
        .insert_header((AUTHORIZATION, auth.clone()))
        .to_request();
    let (status, headers, body) = send(&app, req).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("987654"),
    );

    let req = test::TestRequest::get()
        .uri("/api/games/abc")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let (status, headers, body) = send(&app, req).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        None,
    );
    Ok(())
}
