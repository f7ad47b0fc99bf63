//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod boards;
pub mod embed;
pub mod health;
pub mod uploads;
pub mod verify;

pub use crate::state::AppState;
pub use boards::{
    boards_by_fid_handler, create_board_handler, get_board_handler, list_boards_handler,
    list_boards_post_handler, CreateBoardRequest, CreateBoardResponse,
};
pub use embed::embed_handler;
pub use health::{greeting, health, HealthResponse};
pub use uploads::{presigned_url_get, presigned_url_post, PresignedUrlResponse};
pub use verify::{verify_handler, VerifyResponse};
