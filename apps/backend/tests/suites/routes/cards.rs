use actix_web::http::StatusCode;
use actix_web::test;
use klondike_backend::infra::state::build_state;

use crate::support::{create_test_app, send_json};

#[actix_web::test]
async fn shuffle_is_reproducible_for_a_seed() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_state().build().await?)
        .with_prod_routes()
        .build()
        .await;

    let first = send_json(
        &app,
        test::TestRequest::get()
            .uri("/api/cards/shuffle?seed=7")
            .to_request(),
    )
    .await;
    let second = send_json(
        &app,
        test::TestRequest::get()
            .uri("/api/cards/shuffle?seed=7")
            .to_request(),
    )
    .await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.2["seed"], 7);
    let cards = first.2["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 52);
    assert!(cards.iter().all(|c| c["up"] == false));
    assert_eq!(first.2["cards"], second.2["cards"]);
    Ok(())
}

#[actix_web::test]
async fn initial_deal_has_klondike_shape() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_state().build().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/cards/initial?seed=42")
        .to_request();
    let (status, _, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let state = &body["state"];
    for pile in 1..=7 {
        let cards = state[format!("pile{pile}")].as_array().unwrap();
        assert_eq!(cards.len(), pile);
        assert_eq!(cards.last().unwrap()["up"], true);
        assert!(cards[..pile - 1].iter().all(|c| c["up"] == false));
    }
    assert_eq!(state["draw"].as_array().unwrap().len(), 24);
    assert!(state["discard"].as_array().unwrap().is_empty());
    for stack in 1..=4 {
        assert!(state[format!("stack{stack}")].as_array().unwrap().is_empty());
    }
    Ok(())
}

#[actix_web::test]
async fn cards_endpoints_need_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_state().build().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/cards/shuffle").to_request();
    let (status, _, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["seed"].is_u64());
    Ok(())
}
