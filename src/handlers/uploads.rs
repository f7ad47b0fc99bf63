//! Signed upload URL handlers

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SigninProof;
use crate::error::ApiError;
use crate::handlers::AppState;

/// Response carrying a freshly issued signed upload URL
#[derive(Debug, Serialize, ToSchema)]
pub struct PresignedUrlResponse {
    /// Time-boxed URL the client uploads image content to
    pub url: String,
}

/// GET /presigned_url - Obtain a signed upload URL
///
/// The sign-in proof is read from the `nonce`/`message`/`signature` headers.
#[utoipa::path(
    get,
    path = "/presigned_url",
    tag = "Uploads",
    responses(
        (status = 200, description = "Signed upload URL", body = PresignedUrlResponse),
        (status = 401, description = "Missing or invalid sign-in proof"),
        (status = 500, description = "Upload provider failure"),
        (status = 503, description = "Upload provider not configured")
    )
)]
pub async fn presigned_url_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PresignedUrlResponse>, ApiError> {
    let proof = SigninProof::from_headers(&headers)?;
    issue_upload_url(&state, proof).await
}

/// POST /presigned_url - Obtain a signed upload URL
///
/// The sign-in proof is carried in the JSON body.
#[utoipa::path(
    post,
    path = "/presigned_url",
    tag = "Uploads",
    request_body = SigninProof,
    responses(
        (status = 200, description = "Signed upload URL", body = PresignedUrlResponse),
        (status = 401, description = "Missing or invalid sign-in proof"),
        (status = 500, description = "Upload provider failure"),
        (status = 503, description = "Upload provider not configured")
    )
)]
pub async fn presigned_url_post(
    State(state): State<AppState>,
    Json(proof): Json<SigninProof>,
) -> Result<Json<PresignedUrlResponse>, ApiError> {
    issue_upload_url(&state, proof).await
}

async fn issue_upload_url(
    state: &AppState,
    proof: SigninProof,
) -> Result<Json<PresignedUrlResponse>, ApiError> {
    let verifier = state
        .signin
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Sign-in verifier not configured"))?;

    let verified = verifier.verify(&proof).await?;

    let uploads = state
        .uploads
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Upload provider not configured"))?;

    let url = uploads.create_signed_upload_url().await?;

    tracing::info!(fid = verified.fid, "Issued signed upload URL");

    Ok(Json(PresignedUrlResponse { url }))
}
