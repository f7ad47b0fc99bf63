//! Signed upload URL issuance
//!
//! Wraps the Pinata uploads API: the service requests a short-lived signed
//! URL that the client then uploads image content to directly, so image bytes
//! never pass through this backend.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upload provider errors
#[derive(Debug, Error)]
pub enum UploadError {
    /// The provider could not be reached
    #[error("Upload provider unreachable: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("Upload provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered something unparseable
    #[error("Malformed upload provider response: {0}")]
    Malformed(String),
}

/// Request body for the Pinata signed-URL endpoint
#[derive(Debug, Serialize)]
struct SignUrlRequest {
    date: u64,
    expires: u64,
}

/// Response body of the Pinata signed-URL endpoint
#[derive(Debug, Deserialize)]
struct SignUrlResponse {
    data: String,
}

/// Upload backend
enum UploadBackend {
    /// Pinata uploads API (production)
    Pinata {
        jwt: String,
        endpoint: String,
        http_client: reqwest::Client,
    },
    /// Fixed URL (tests and local development)
    Mock { url: String },
}

/// Issues time-boxed signed upload URLs from the object-storage provider
pub struct UploadService {
    ttl_secs: u64,
    backend: UploadBackend,
}

impl UploadService {
    /// Create a service backed by the Pinata uploads API
    pub fn pinata(jwt: impl Into<String>, endpoint: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            backend: UploadBackend::Pinata {
                jwt: jwt.into(),
                endpoint: endpoint.into(),
                http_client: reqwest::Client::new(),
            },
        }
    }

    /// Create a service that always issues the given URL.
    /// For tests and local development.
    pub fn mock(url: impl Into<String>) -> Self {
        Self {
            ttl_secs: 60,
            backend: UploadBackend::Mock { url: url.into() },
        }
    }

    /// How long issued URLs stay valid
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Request a signed upload URL from the provider
    pub async fn create_signed_upload_url(&self) -> Result<String, UploadError> {
        match &self.backend {
            UploadBackend::Pinata {
                jwt,
                endpoint,
                http_client,
            } => {
                let date = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);

                let request = SignUrlRequest {
                    date,
                    expires: self.ttl_secs,
                };

                let url = format!("{}/v3/files/sign", endpoint.trim_end_matches('/'));
                let response = http_client
                    .post(&url)
                    .bearer_auth(jwt)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, "Failed to reach upload provider");
                        UploadError::Transport(e.to_string())
                    })?;

                let status = response.status();
                if !status.is_success() {
                    let message = response.text().await.unwrap_or_default();
                    tracing::error!(status = %status, "Upload provider returned error");
                    return Err(UploadError::Provider {
                        status: status.as_u16(),
                        message,
                    });
                }

                let signed: SignUrlResponse = response.json().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to parse upload provider response");
                    UploadError::Malformed(e.to_string())
                })?;

                tracing::debug!(expires = self.ttl_secs, "Issued signed upload URL");
                Ok(signed.data)
            }
            UploadBackend::Mock { url } => Ok(url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_fixed_url() {
        let service = UploadService::mock("https://uploads.example/signed/abc");
        let url = service.create_signed_upload_url().await.unwrap();
        assert_eq!(url, "https://uploads.example/signed/abc");
        assert_eq!(service.ttl_secs(), 60);
    }
}
