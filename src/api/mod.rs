mod store;

pub use store::ProjectStore;

use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::core::{Calculation, Kpis, MonthlyRecord, ProjectConfig, calculate};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProjectStore>,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub flow: Vec<MonthlyRecord>,
    pub kpis: Kpis,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<Calculation> for CalculationResponse {
    fn from(value: Calculation) -> Self {
        Self {
            flow: value.flow,
            kpis: value.kpis,
            warnings: value
                .warnings
                .into_iter()
                .map(|w| w.message().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct SavedResponse {
    message: &'static str,
    name: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/calculate", post(calculate_handler))
        .route("/projects", get(list_projects_handler).post(save_project_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

pub async fn run_http_server(config: &ServerConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let state = AppState {
        store: Arc::new(ProjectStore::new()),
    };
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "cash flow API listening");

    axum::serve(listener, app).await
}

async fn root_handler() -> Response {
    json_response(
        StatusCode::OK,
        MessageResponse {
            message: "Financial Tracker API is running",
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_handler(payload: Result<Json<ProjectConfig>, JsonRejection>) -> Response {
    let config = match payload {
        Ok(Json(config)) => config,
        Err(rejection) => return rejection_response(rejection),
    };

    match calculate(&config) {
        Ok(calculation) => json_response(StatusCode::OK, CalculationResponse::from(calculation)),
        Err(e) => {
            warn!(project = %config.name, error = %e, "calculation rejected");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

async fn save_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectConfig>, JsonRejection>,
) -> Response {
    let config = match payload {
        Ok(Json(config)) => config,
        Err(rejection) => return rejection_response(rejection),
    };

    if config.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "name must not be empty");
    }

    let name = config.name.clone();
    let replaced = state.store.save(config);
    info!(project = %name, replaced, stored = state.store.len(), "project saved");

    json_response(
        StatusCode::OK,
        SavedResponse {
            message: "Project saved successfully",
            name,
        },
    )
}

async fn list_projects_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.store.list())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid project JSON payload: {}", rejection.body_text()),
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
