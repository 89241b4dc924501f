//! HTTP gateway adapter.
//!
//! Thin axum front end over [`MonitorService`].  Request decoding, CORS
//! and status-code mapping live here; everything else is delegated.
//!
//! | Method | Path                            | Handler             |
//! |--------|---------------------------------|---------------------|
//! | GET    | `/`                             | health banner       |
//! | GET    | `/api/sensors`                  | list sensors        |
//! | GET    | `/api/water-data?sensors=a,b`   | query (query string)|
//! | POST   | `/api/water-data`               | query (JSON body)   |
//! | POST   | `/api/sensors/{name}/simulate`  | drive sim channel   |
//!
//! Internal failures map to a generic 500 body; detail goes to the log only.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use log::{error, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::log_sink::LogEventSink;
use crate::app::commands::{QueryRequest, SimulateInput};
use crate::app::service::{MonitorService, ReadMode};
use crate::error::Error;

pub const BANNER: &str = "SIMOKA Backend Running...";
const PROCESS_FAILED: &str = "Failed to process water data";

type AppState = Arc<MonitorService>;

/// Build the gateway router around a shared service.
pub fn router(service: Arc<MonitorService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/sensors", get(list_sensors))
        .route("/api/water-data", get(water_data_query).post(water_data_body))
        .route("/api/sensors/{name}/simulate", post(simulate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn root() -> &'static str {
    BANNER
}

async fn list_sensors(State(service): State<AppState>) -> Response {
    Json(service.sensors()).into_response()
}

#[derive(Debug, Deserialize)]
struct WaterDataParams {
    sensors: Option<String>,
}

async fn water_data_query(
    State(service): State<AppState>,
    Query(params): Query<WaterDataParams>,
) -> Response {
    let request = params
        .sensors
        .as_deref()
        .map(QueryRequest::from_csv)
        .unwrap_or_default();
    run_query(service, request).await
}

/// An empty body is the same as `{}`: every registered sensor.
async fn water_data_body(State(service): State<AppState>, body: Bytes) -> Response {
    match decode_or_default::<QueryRequest>(&body) {
        Ok(request) => run_query(service, request).await,
        Err(e) => {
            warn!("rejected water-data body: {e}");
            error_body(StatusCode::BAD_REQUEST, "invalid request body")
        }
    }
}

async fn run_query(service: AppState, request: QueryRequest) -> Response {
    // The concurrent processor blocks on its own poll loop.
    let outcome = tokio::task::spawn_blocking(move || {
        service.query(&request, ReadMode::Concurrent, &mut LogEventSink::new())
    })
    .await;

    match outcome {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            error!("water-data worker failed: {e}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, PROCESS_FAILED)
        }
    }
}

/// An empty body changes nothing but still counts as an update.
async fn simulate(
    State(service): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let input = match decode_or_default::<SimulateInput>(&body) {
        Ok(input) => input,
        Err(e) => {
            warn!("rejected simulate body for '{name}': {e}");
            return error_body(StatusCode::BAD_REQUEST, "invalid request body");
        }
    };
    match service.simulate(&name, &input, &mut LogEventSink::new()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// Decode a JSON body, treating a blank body as `T::default()`.
fn decode_or_default<T>(body: &[u8]) -> serde_json::Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(T::default())
    } else {
        serde_json::from_slice(body)
    }
}

fn error_response(err: &Error) -> Response {
    match err {
        Error::UnknownSensor(_) => error_body(StatusCode::NOT_FOUND, "unknown sensor"),
        Error::NotSimulated(_) => error_body(StatusCode::CONFLICT, "sensor is not simulated"),
        Error::InvalidInput(msg) => error_body(StatusCode::BAD_REQUEST, msg),
        other => {
            error!("endpoint error: {other}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, PROCESS_FAILED)
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
