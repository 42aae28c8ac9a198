// DL Simulator - Web Server
// REST API with Axum: the same rules as the CLI, behind JSON endpoints

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Serialize;
use std::io::{self, IsTerminal};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use dl_simulator::logging::{init_logging, LogConfig};
use dl_simulator::{generate, IdentityInput, State};

/// Server configuration (flags or environment)
#[derive(Parser, Debug)]
#[command(name = "dl-server", version, about = "DL Simulator HTTP API")]
struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "DL_SERVER_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Serialize)]
struct StateResponse {
    name: &'static str,
    code: &'static str,
    implemented: bool,
}

impl From<State> for StateResponse {
    fn from(state: State) -> Self {
        Self {
            name: state.name(),
            code: state.code(),
            implemented: state.is_implemented(),
        }
    }
}

#[derive(Serialize)]
struct GenerateResponse {
    state: String,
    dl_number: String,
    message: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/states - All 50 states and whether each has a format
async fn list_states() -> impl IntoResponse {
    let states: Vec<StateResponse> = State::ALL.into_iter().map(StateResponse::from).collect();
    Json(ApiResponse::ok(states))
}

/// POST /api/generate - Generate one DL number
async fn generate_dl_number(Json(input): Json<IdentityInput>) -> impl IntoResponse {
    match generate(&input) {
        Ok(dl) => {
            let response = GenerateResponse {
                message: dl.message(),
                state: dl.state,
                dl_number: dl.number,
            };
            (StatusCode::OK, Json(ApiResponse::ok(response)))
        }
        Err(e) => {
            warn!(state = %input.state, error = %e, "Generate request rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<GenerateResponse>::err(e.to_string())),
            )
        }
    }
}

fn app() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/states", get(list_states))
        .route("/generate", post(generate_dl_number));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    let log_config = LogConfig::from_verbosity(config.verbose.max(1), false)
        .with_ansi(io::stderr().is_terminal());
    init_logging(&log_config).context("Failed to initialize logging")?;

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.addr))?;

    info!(addr = %config.addr, "Server running");

    axum::serve(listener, app())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_generate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_states_lists_fifty() {
        let request = Request::builder().uri("/api/states").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;
        let states = body["data"].as_array().unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(states.len(), 50);
        assert_eq!(states.iter().filter(|s| s["implemented"] == true).count(), 5);
    }

    #[tokio::test]
    async fn test_generate_florida() {
        let (status, body) = call(post_generate(
            r#"{"state":"Florida","last_name":"Smith","birthdate":"1990-05-15","gender":"M"}"#,
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["dl_number"], "S530901750");
        assert_eq!(body["data"]["message"], "Florida DL Number: S530901750");
    }

    #[tokio::test]
    async fn test_generate_placeholder_state() {
        let (status, body) = call(post_generate(r#"{"state":"Texas","last_name":"Smith"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["dl_number"], "DL format not implemented yet.");
    }

    #[tokio::test]
    async fn test_generate_empty_name_rejected() {
        let (status, body) = call(post_generate(r#"{"state":"Illinois","last_name":""}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }
}
