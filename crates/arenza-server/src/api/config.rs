use axum::{extract::State, response::IntoResponse, Extension, Json};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// Hands the browser the backend URL, the public anon key and the admin
/// email. Served on both relay paths.
pub(super) async fn get_config(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    match state.client_config.as_deref() {
        Some(config) => Ok(Json(config.clone())),
        None => {
            tracing::error!(request_id = %req_id.0, "config requested but backend credentials are unset");
            Err(ApiError::new(
                req_id.0,
                "config_missing",
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set",
            ))
        }
    }
}
