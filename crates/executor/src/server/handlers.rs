use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::{SecondsFormat, Utc};
use common::models::TradingSignal;
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::{error::AppError, state::AppState};

pub const SERVICE_NAME: &str = "Binance Webhook Bot";

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct EnvResponse {
    pub has_api_key: bool,
    pub has_secret_key: bool,
    pub environment: String,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `POST /webhook`: answers success once the signal has been handled,
/// whatever the exchange said.
pub async fn webhook(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WebhookResponse>, AppError> {
    let signal_id = Uuid::new_v4();
    info!(%signal_id, "Webhook received at {}", now_iso());

    let Json(body) = payload.inspect_err(|e| error!(%signal_id, "Webhook body rejected: {}", e))?;
    let signal = TradingSignal::from_value(body)
        .inspect_err(|e| error!(%signal_id, "Webhook handling error: {}", e))?;

    state
        .dispatcher
        .dispatch(&signal)
        .instrument(info_span!("signal", %signal_id))
        .await;

    Ok(Json(WebhookResponse {
        status: "success",
        message: "Signal processed",
        timestamp: now_iso(),
    }))
}

/// `GET /`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        service: SERVICE_NAME,
        timestamp: now_iso(),
        environment: state.settings.environment.clone(),
    })
}

/// `GET /env`: reports whether credentials are configured, never their values.
pub async fn env_info(State(state): State<AppState>) -> Json<EnvResponse> {
    Json(EnvResponse {
        has_api_key: state.settings.has_api_key(),
        has_secret_key: state.settings.has_secret_key(),
        environment: state.settings.environment.clone(),
    })
}
