//! HTTP surface for the dashboard
//!
//! Two JSON endpoints back the browser frontend: the sorted city list for the
//! dropdown, and the derived forecast/warnings for a selected city. Anything
//! else falls through to the static frontend bundle.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::error::TempoError;
use crate::models::City;
use crate::service::{CityDashboard, DashboardService, Selection};

/// The single user-facing error slot, returned as a JSON body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error response wrapper mapping domain errors to HTTP statuses
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<TempoError> for ApiError {
    fn from(err: TempoError) -> Self {
        let status = match err {
            TempoError::Selection { .. } => StatusCode::NOT_FOUND,
            TempoError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            TempoError::Config { .. } | TempoError::General { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

/// Build the application router
pub fn router(service: Arc<DashboardService>, frontend_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/cities", get(get_cities))
        .route("/api/forecast/{city_id}", get(get_forecast))
        .fallback_service(ServeDir::new(frontend_dir))
        .layer(cors)
        .with_state(service)
}

async fn get_cities(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(service.cities().await?))
}

async fn get_forecast(
    State(service): State<Arc<DashboardService>>,
    Path(city_id): Path<u32>,
) -> Result<Json<CityDashboard>, ApiError> {
    match service.select_city(city_id).await? {
        Selection::Applied(dashboard) => Ok(Json(dashboard)),
        Selection::Superseded => Err(ApiError {
            status: StatusCode::CONFLICT,
            message: "Selection superseded by a newer request".to_string(),
        }),
    }
}

/// Bind and serve the dashboard API
pub async fn run(service: Arc<DashboardService>, config: &ServerConfig) -> anyhow::Result<()> {
    let app = router(service, &config.frontend_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard API running at http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
