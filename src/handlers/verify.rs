//! Sign-in verification handler

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SigninProof;
use crate::error::ApiError;
use crate::handlers::AppState;

/// Response for a successful verification
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Always "ok"
    pub status: String,
    /// The fid the proof resolved to
    pub fid: i64,
}

/// POST /verify - Verify a sign-in proof
///
/// Forwards the `{nonce, message, signature}` triple together with the
/// deployment's fixed domain to the auth relay and reports the resolved fid.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Auth",
    request_body = SigninProof,
    responses(
        (status = 200, description = "Proof verified", body = VerifyResponse),
        (status = 401, description = "Proof rejected"),
        (status = 503, description = "Sign-in relay unavailable")
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(proof): Json<SigninProof>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let verifier = state
        .signin
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Sign-in verifier not configured"))?;

    let verified = verifier.verify(&proof).await?;

    tracing::info!(fid = verified.fid, "Sign-in verified");

    Ok(Json(VerifyResponse {
        status: "ok".to_string(),
        fid: verified.fid,
    }))
}
