//! Sign-in proof verification module
//!
//! A caller proves control of a Farcaster identity with a
//! `{nonce, message, signature}` triple. The triple, together with the
//! deployment's fixed domain, is forwarded to the auth relay, which answers
//! with a success flag and the fid it resolved. The verified fid is the only
//! owner identifier this service ever trusts; client-supplied fid fields are
//! ignored for writes.

use axum::http::HeaderMap;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Sign-in verification errors
#[derive(Debug, Error)]
pub enum SigninError {
    /// The relay judged the proof and rejected it
    #[error("Sign-in verification failed: {0}")]
    Rejected(String),

    /// The relay could not be reached or answered malformed data
    #[error("Sign-in relay unavailable: {0}")]
    RelayUnavailable(String),
}

/// A sign-in proof as supplied by the client, via JSON body or the
/// `nonce`/`message`/`signature` headers
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SigninProof {
    /// Challenge nonce the message was signed over
    pub nonce: String,
    /// The signed sign-in message
    pub message: String,
    /// Hex-encoded signature over the message
    pub signature: String,
}

impl SigninProof {
    /// Extract a proof from the `nonce`/`message`/`signature` request headers
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let field = |name: &str| -> Result<String, ApiError> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| ApiError::unauthorized(format!("Missing {} header", name)))
        };

        Ok(Self {
            nonce: field("nonce")?,
            message: field("message")?,
            signature: field("signature")?,
        })
    }
}

/// A successfully verified sign-in
#[derive(Debug, Clone, Copy)]
pub struct VerifiedSignin {
    /// The fid the relay resolved for the proof; authoritative owner identity
    pub fid: i64,
}

/// Request body sent to the relay verify endpoint
#[derive(Debug, Serialize)]
struct RelayVerifyRequest<'a> {
    nonce: &'a str,
    domain: &'a str,
    message: &'a str,
    signature: &'a str,
}

/// Relay verdict for a sign-in proof
#[derive(Debug, Deserialize)]
struct RelayVerdict {
    success: bool,
    fid: Option<i64>,
    error: Option<String>,
}

/// Mock identity registered for a known signature
struct MockIdentity {
    fid: i64,
    domain: String,
}

/// Verifier backend
enum VerifierBackend {
    /// Relay service (production)
    Relay {
        verify_url: String,
        http_client: reqwest::Client,
    },
    /// In-memory signature table (tests and local development)
    Mock(DashMap<String, MockIdentity>),
}

/// Verifies sign-in proofs against the relay service and the fixed
/// per-deployment domain
pub struct SigninVerifier {
    domain: String,
    backend: VerifierBackend,
}

impl SigninVerifier {
    /// Create a verifier backed by the relay service
    pub fn relay(domain: impl Into<String>, verify_url: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            backend: VerifierBackend::Relay {
                verify_url: verify_url.into(),
                http_client: reqwest::Client::new(),
            },
        }
    }

    /// Create a verifier backed by an in-memory signature table.
    ///
    /// No proof verifies until registered with [`register`](Self::register).
    /// For tests and local development.
    pub fn mock(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            backend: VerifierBackend::Mock(DashMap::new()),
        }
    }

    /// Register a signature with the mock backend as proving control of `fid`,
    /// bound to `domain`. No-op on the relay backend.
    pub fn register(&self, signature: impl Into<String>, fid: i64, domain: impl Into<String>) {
        if let VerifierBackend::Mock(identities) = &self.backend {
            identities.insert(
                signature.into(),
                MockIdentity {
                    fid,
                    domain: domain.into(),
                },
            );
        }
    }

    /// The domain proofs must be bound to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Verify a sign-in proof, returning the fid it proves control of
    pub async fn verify(&self, proof: &SigninProof) -> Result<VerifiedSignin, SigninError> {
        match &self.backend {
            VerifierBackend::Relay {
                verify_url,
                http_client,
            } => self.verify_against_relay(verify_url, http_client, proof).await,
            VerifierBackend::Mock(identities) => {
                let identity = identities
                    .get(&proof.signature)
                    .ok_or_else(|| SigninError::Rejected("Unknown signature".to_string()))?;
                if identity.domain != self.domain {
                    return Err(SigninError::Rejected(format!(
                        "Proof not bound to domain {}",
                        self.domain
                    )));
                }
                Ok(VerifiedSignin { fid: identity.fid })
            }
        }
    }

    async fn verify_against_relay(
        &self,
        verify_url: &str,
        http_client: &reqwest::Client,
        proof: &SigninProof,
    ) -> Result<VerifiedSignin, SigninError> {
        let request = RelayVerifyRequest {
            nonce: &proof.nonce,
            domain: &self.domain,
            message: &proof.message,
            signature: &proof.signature,
        };

        let response = http_client
            .post(verify_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach sign-in relay");
                SigninError::RelayUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Sign-in relay returned error");
            return Err(SigninError::RelayUnavailable(format!(
                "relay returned {}",
                status
            )));
        }

        let verdict: RelayVerdict = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse relay verdict");
            SigninError::RelayUnavailable(e.to_string())
        })?;

        if !verdict.success {
            return Err(SigninError::Rejected(
                verdict
                    .error
                    .unwrap_or_else(|| "Proof rejected by relay".to_string()),
            ));
        }

        let fid = verdict.fid.ok_or_else(|| {
            SigninError::Rejected("Relay verdict missing fid".to_string())
        })?;

        tracing::debug!(fid = fid, "Sign-in proof verified");
        Ok(VerifiedSignin { fid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn proof(signature: &str) -> SigninProof {
        SigninProof {
            nonce: "abc123".to_string(),
            message: "example.com wants you to sign in".to_string(),
            signature: signature.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_verify_known_signature() {
        let verifier = SigninVerifier::mock("example.com");
        verifier.register("0xsig", 42, "example.com");

        let verified = verifier.verify(&proof("0xsig")).await.unwrap();
        assert_eq!(verified.fid, 42);
    }

    #[tokio::test]
    async fn test_mock_verify_unknown_signature() {
        let verifier = SigninVerifier::mock("example.com");
        verifier.register("0xsig", 42, "example.com");

        let result = verifier.verify(&proof("0xtampered")).await;
        assert!(matches!(result, Err(SigninError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_mock_verify_domain_mismatch() {
        let verifier = SigninVerifier::mock("example.com");
        verifier.register("0xsig", 42, "evil.example");

        let result = verifier.verify(&proof("0xsig")).await;
        assert!(matches!(result, Err(SigninError::Rejected(_))));
    }

    #[test]
    fn test_proof_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("nonce", HeaderValue::from_static("abc123"));
        headers.insert("message", HeaderValue::from_static("sign in"));
        headers.insert("signature", HeaderValue::from_static("0xsig"));

        let proof = SigninProof::from_headers(&headers).unwrap();
        assert_eq!(proof.nonce, "abc123");
        assert_eq!(proof.signature, "0xsig");
    }

    #[test]
    fn test_proof_from_headers_missing_field() {
        let mut headers = HeaderMap::new();
        headers.insert("nonce", HeaderValue::from_static("abc123"));

        assert!(SigninProof::from_headers(&headers).is_err());
    }
}
