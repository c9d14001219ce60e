use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nd_core::{CompanyReport, Error};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub company_name: String,
}

/// Pipeline failure rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("❌ Analysis failed: {}", self.0);
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

pub async fn analyze_company_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompanyRequest>,
) -> Result<Json<CompanyReport>, ApiError> {
    let report = state.pipeline.process_company(&request.company_name).await?;
    Ok(Json(report))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
