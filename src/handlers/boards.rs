//! Board handlers
//!
//! Creation and own-boards listing require a verified sign-in proof; the
//! verified fid is the owner identity for every write, regardless of any
//! fid field the client sends. Lookup by slug is public.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{SigninProof, VerifiedSignin};
use crate::db::{BoardStore, BoardWithImages, CreateBoard, NewBoardImage};
use crate::error::ApiError;
use crate::handlers::AppState;

/// Request for creating a board with its images
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    /// Display name of the board
    pub board_name: String,
    /// Unique human-readable slug
    pub slug: String,
    /// Object-storage URLs of the board's images
    #[serde(default)]
    pub image_links: Vec<String>,
    /// Captions, aligned positionally with `imageLinks`
    #[serde(default)]
    pub captions: Option<Vec<String>>,
    /// Accepted for wire compatibility; ownership always comes from the
    /// verified sign-in proof
    #[serde(default)]
    pub fid: Option<i64>,
    /// Sign-in proof nonce
    pub nonce: String,
    /// Signed sign-in message
    pub message: String,
    /// Signature over the message
    pub signature: String,
}

/// Response for a successful board creation
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBoardResponse {
    /// Always "ok"
    pub status: String,
}

/// POST /boards - Create a board and its images
///
/// The board row and all image rows are written in one transaction; a
/// duplicate slug or any other datastore rejection leaves nothing behind.
#[utoipa::path(
    post,
    path = "/boards",
    tag = "Boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 200, description = "Board created", body = CreateBoardResponse),
        (status = 401, description = "Missing or invalid sign-in proof"),
        (status = 500, description = "Datastore rejected the write"),
        (status = 503, description = "Backing service not configured")
    )
)]
pub async fn create_board_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<CreateBoardResponse>, ApiError> {
    let proof = SigninProof {
        nonce: request.nonce,
        message: request.message,
        signature: request.signature,
    };
    let verified = verify_proof(&state, &proof).await?;

    if let Some(client_fid) = request.fid {
        if client_fid != verified.fid {
            tracing::warn!(
                client_fid = client_fid,
                verified_fid = verified.fid,
                "Ignoring client-supplied fid on board creation"
            );
        }
    }

    let store = board_store(&state)?;
    let board = store
        .create_board(CreateBoard {
            name: request.board_name,
            fid: verified.fid,
            slug: request.slug,
            images: NewBoardImage::align(request.image_links, request.captions),
        })
        .await?;

    tracing::info!(
        board_id = board.id,
        fid = board.fid,
        slug = %board.slug,
        "Board created via API"
    );

    Ok(Json(CreateBoardResponse {
        status: "ok".to_string(),
    }))
}

/// GET /boards - List the caller's boards
///
/// The sign-in proof is read from the `nonce`/`message`/`signature` headers;
/// the verified fid selects the boards. Newest first.
#[utoipa::path(
    get,
    path = "/boards",
    tag = "Boards",
    responses(
        (status = 200, description = "The caller's boards, newest first", body = [BoardWithImages]),
        (status = 401, description = "Missing or invalid sign-in proof"),
        (status = 500, description = "Datastore failure"),
        (status = 503, description = "Backing service not configured")
    )
)]
pub async fn list_boards_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BoardWithImages>>, ApiError> {
    let proof = SigninProof::from_headers(&headers)?;
    let verified = verify_proof(&state, &proof).await?;

    let store = board_store(&state)?;
    let boards = store.list_by_fid(verified.fid).await?;
    Ok(Json(boards))
}

/// POST /list-boards - List the caller's boards
///
/// Body-carried variant of `GET /boards` for clients that cannot set the
/// proof headers.
#[utoipa::path(
    post,
    path = "/list-boards",
    tag = "Boards",
    request_body = SigninProof,
    responses(
        (status = 200, description = "The caller's boards, newest first", body = [BoardWithImages]),
        (status = 401, description = "Missing or invalid sign-in proof"),
        (status = 500, description = "Datastore failure"),
        (status = 503, description = "Backing service not configured")
    )
)]
pub async fn list_boards_post_handler(
    State(state): State<AppState>,
    Json(proof): Json<SigninProof>,
) -> Result<Json<Vec<BoardWithImages>>, ApiError> {
    let verified = verify_proof(&state, &proof).await?;

    let store = board_store(&state)?;
    let boards = store.list_by_fid(verified.fid).await?;
    Ok(Json(boards))
}

/// GET /boards/{fid} - List boards for a fid
///
/// Public when `PUBLIC_FID_LISTING` is enabled; otherwise the caller must
/// present a proof resolving to the requested fid.
#[utoipa::path(
    get,
    path = "/boards/{fid}",
    tag = "Boards",
    params(
        ("fid" = i64, Path, description = "Owner fid")
    ),
    responses(
        (status = 200, description = "Boards for the fid, newest first", body = [BoardWithImages]),
        (status = 401, description = "Proof required or does not match the requested fid"),
        (status = 500, description = "Datastore failure"),
        (status = 503, description = "Backing service not configured")
    )
)]
pub async fn boards_by_fid_handler(
    State(state): State<AppState>,
    Path(fid): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Vec<BoardWithImages>>, ApiError> {
    if !state.public_fid_listing {
        let proof = SigninProof::from_headers(&headers)?;
        let verified = verify_proof(&state, &proof).await?;
        if verified.fid != fid {
            return Err(ApiError::unauthorized(
                "Sign-in proof does not match the requested fid",
            ));
        }
    }

    let store = board_store(&state)?;
    let boards = store.list_by_fid(fid).await?;
    Ok(Json(boards))
}

/// GET /board/{slug} - Fetch a single board by slug
///
/// Public; answers 404 when no board matches the slug.
#[utoipa::path(
    get,
    path = "/board/{slug}",
    tag = "Boards",
    params(
        ("slug" = String, Path, description = "Board slug")
    ),
    responses(
        (status = 200, description = "The board with its images", body = BoardWithImages),
        (status = 404, description = "No board for the slug"),
        (status = 500, description = "Datastore failure"),
        (status = 503, description = "Backing service not configured")
    )
)]
pub async fn get_board_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BoardWithImages>, ApiError> {
    let store = board_store(&state)?;
    let board = store.find_by_slug(&slug).await?;
    Ok(Json(board))
}

async fn verify_proof(state: &AppState, proof: &SigninProof) -> Result<VerifiedSignin, ApiError> {
    let verifier = state
        .signin
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Sign-in verifier not configured"))?;
    Ok(verifier.verify(proof).await?)
}

fn board_store(state: &AppState) -> Result<&BoardStore, ApiError> {
    state
        .boards
        .as_deref()
        .ok_or_else(|| ApiError::service_unavailable("Board store not configured"))
}
