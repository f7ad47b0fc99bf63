//! Application state module
//!
//! Shared handles to the backing services, constructed once at startup and
//! passed by reference into every request handler.

use std::sync::Arc;

use crate::auth::SigninVerifier;
use crate::config::Config;
use crate::db::{BoardStore, StoreError};
use crate::frame::FrameSettings;
use crate::uploads::UploadService;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Board store (PostgreSQL, or in-memory fallback)
    pub boards: Option<Arc<BoardStore>>,
    /// Signed upload URL issuer
    pub uploads: Option<Arc<UploadService>>,
    /// Sign-in proof verifier
    pub signin: Option<Arc<SigninVerifier>>,
    /// Embed rendering settings
    pub frame: Arc<FrameSettings>,
    /// Whether `GET /boards/{fid}` is public or requires proof of ownership
    pub public_fid_listing: bool,
}

impl AppState {
    /// Construct all service handles from configuration.
    ///
    /// Fails only when a configured PostgreSQL database cannot be reached;
    /// missing optional services leave their handle unset and the affected
    /// endpoints answer 503.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let boards = match &config.database_url {
            Some(url) => {
                tracing::info!("Using PostgreSQL board storage");
                Some(Arc::new(
                    BoardStore::with_postgres(url, config.database_max_connections).await?,
                ))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory board storage - boards will be lost on restart!");
                Some(Arc::new(BoardStore::in_memory()))
            }
        };

        let uploads = match &config.pinata_jwt {
            Some(jwt) => {
                tracing::info!(
                    endpoint = %config.upload_endpoint,
                    gateway = config.gateway_url.as_deref().unwrap_or("-"),
                    ttl_secs = config.upload_url_ttl_secs,
                    "Upload provider configured"
                );
                Some(Arc::new(UploadService::pinata(
                    jwt.clone(),
                    config.upload_endpoint.clone(),
                    config.upload_url_ttl_secs,
                )))
            }
            None => {
                tracing::warn!("PINATA_JWT not set, upload URL issuance disabled");
                None
            }
        };

        let signin = Some(Arc::new(SigninVerifier::relay(
            config.auth_domain.clone(),
            config.auth_relay_url.clone(),
        )));
        tracing::info!(
            domain = %config.auth_domain,
            relay = %config.auth_relay_url,
            "Sign-in verifier configured"
        );

        Ok(Self {
            boards,
            uploads,
            signin,
            frame: Arc::new(FrameSettings::for_base_url(&config.public_base_url)),
            public_fid_listing: config.public_fid_listing,
        })
    }
}
