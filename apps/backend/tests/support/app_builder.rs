use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use klondike_backend::middleware::request_trace::RequestTrace;
use klondike_backend::middleware::structured_logger::StructuredLogger;
use klondike_backend::middleware::trace_span::TraceSpan;
use klondike_backend::routes;
use klondike_backend::state::app_state::AppState;
use serde_json::Value;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builds an actix test service with the production middleware stack.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// The same routes `main` serves, auth gate included.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

/// Call the service and split the response into status, headers and body.
pub async fn send<S>(app: &S, req: Request) -> (StatusCode, HeaderMap, Bytes)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    (status, headers, body)
}

/// `send`, then parse the body as JSON.
pub async fn send_json<S>(app: &S, req: Request) -> (StatusCode, HeaderMap, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let (status, headers, body) = send(app, req).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|_| panic!("body is not JSON: {}", String::from_utf8_lossy(&body)));
    (status, headers, json)
}
