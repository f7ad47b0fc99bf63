//! Social preview / embed handler

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::frame::render_board_embed;
use crate::handlers::AppState;

/// GET /embed/{slug} - Render the social preview document for a board
///
/// Presentation only: lookup failures and empty boards degrade to the fixed
/// fallback image instead of an error, so link unfurlers always get a page.
#[utoipa::path(
    get,
    path = "/embed/{slug}",
    tag = "Embed",
    params(
        ("slug" = String, Path, description = "Board slug")
    ),
    responses(
        (status = 200, description = "Preview HTML with frame meta tags")
    )
)]
pub async fn embed_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Html<String> {
    let board = match &state.boards {
        Some(store) => match store.find_by_slug(&slug).await {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::debug!(slug = %slug, error = %e, "Embed lookup failed, using fallback image");
                None
            }
        },
        None => None,
    };

    let image_url = board
        .as_ref()
        .and_then(|b| b.images.first())
        .map(|image| image.image_url.as_str())
        .unwrap_or(state.frame.fallback_image_url.as_str());

    Html(render_board_embed(&state.frame, &slug, image_url))
}
