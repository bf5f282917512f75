use crate::api::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

#[derive(serde::Deserialize)]
struct AuthParams {
    publickey: Option<String>,
}

/// Guards the `/v1` routes when a bearer token is configured. The request
/// passes with `Authorization: Bearer <token>` or with the configured
/// `publickey` query value.
pub async fn require_token(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = app_state.config.bearer_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    if let Some(public_key) = app_state.config.public_key.as_deref() {
        let provided = Query::<AuthParams>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(params)| params.publickey);

        if provided.as_deref() == Some(public_key) {
            info!("Requested with public key");
            return Ok(next.run(request).await);
        }
    }

    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if bearer == Some(token) {
        Ok(next.run(request).await)
    } else {
        debug!(path = %request.uri().path(), "Rejected unauthorized request");
        Err(ApiError::PermissionDenied)
    }
}
