//! Castboard Server Library - REST API components for sharing image boards
//! on Farcaster
//!
//! This library exposes the server components for use in integration tests.
//! The main binary uses these same components.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod frame;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod uploads;

pub use auth::{SigninError, SigninProof, SigninVerifier, VerifiedSignin};
pub use config::Config;
pub use db::{
    Board, BoardImage, BoardStore, BoardWithImages, CreateBoard, MemoryBoardStore, NewBoardImage,
    PostgresBoardStore, StoreError,
};
pub use error::ApiError;
pub use frame::FrameSettings;
pub use openapi::ApiDoc;
pub use routes::{create_router, create_router_with_config};
pub use state::AppState;
pub use uploads::{UploadError, UploadService};
