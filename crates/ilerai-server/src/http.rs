//! Gateway-facing HTTP endpoint.
//!
//! - `POST /api/ussd`: one USSD turn, JSON or form body, `text/plain` reply
//! - `GET /api/ussd/test`: service metadata as JSON
//! - `GET /health`: liveness probe

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Request, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

use ilerai_application::{ServiceInfo, TurnRequest, UssdEngine};
use ilerai_core::ussd::Screen;

type SharedEngine = Arc<UssdEngine>;

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/api/ussd", post(ussd_callback))
        .route("/api/ussd/test", get(service_info))
        .route("/health", get(health))
        .with_state(engine)
}

async fn ussd_callback(
    State(engine): State<SharedEngine>,
    GatewayTurn(request): GatewayTurn,
) -> Response {
    let response = engine.handle_turn(&request).await;
    plain_text(response.render())
}

async fn service_info(State(engine): State<SharedEngine>) -> Json<ServiceInfo> {
    Json(engine.service_info())
}

async fn health() -> &'static str {
    "ok"
}

fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// A turn decoded from either a JSON or an urlencoded form body.
///
/// An undecodable body is answered with status 200 and the `END`
/// unavailable line; the gateway never sees a 4xx.
pub struct GatewayTurn(pub TurnRequest);

#[axum::async_trait]
impl<S> FromRequest<S> for GatewayTurn
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let decoded = if is_json {
            Json::<TurnRequest>::from_request(req, state)
                .await
                .map(|Json(turn)| turn)
                .map_err(|rejection| rejection.body_text())
        } else {
            Form::<TurnRequest>::from_request(req, state)
                .await
                .map(|Form(turn)| turn)
                .map_err(|rejection| rejection.body_text())
        };

        decoded.map(GatewayTurn).map_err(|reason| {
            tracing::warn!("Rejected USSD callback body: {}", reason);
            plain_text(Screen::unavailable().render())
        })
    }
}
