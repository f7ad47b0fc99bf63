//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::SocketAddr;

/// Default verify endpoint of the Farcaster auth relay
const DEFAULT_AUTH_RELAY_URL: &str = "https://relay.farcaster.xyz/v1/verify";

/// Default Pinata uploads API endpoint
const DEFAULT_UPLOAD_ENDPOINT: &str = "https://uploads.pinata.cloud";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 3000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: [u8; 4],
    /// Allowed CORS origins, comma-separated (default: allow all in dev)
    pub allowed_origins: Option<Vec<String>>,
    /// Request body limit in MB (default: 2)
    pub body_limit_mb: usize,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Enable rate limiting (default: false for tests, true when loaded from env)
    pub rate_limit_enabled: bool,
    /// Rate limit: requests per second (default: 10)
    pub rate_limit_per_sec: u64,
    /// Rate limit: burst size (default: 20)
    pub rate_limit_burst: u32,
    /// Postgres connection URL (in-memory board store when unset)
    pub database_url: Option<String>,
    /// Database connection pool maximum connections (default: 10)
    pub database_max_connections: u32,
    /// Pinata API JWT (upload URL issuance disabled when unset)
    pub pinata_jwt: Option<String>,
    /// Pinata uploads API endpoint
    pub upload_endpoint: String,
    /// Pinata gateway host serving uploaded content
    pub gateway_url: Option<String>,
    /// Signed upload URL validity in seconds (default: 60)
    pub upload_url_ttl_secs: u64,
    /// Verify endpoint of the sign-in relay service
    pub auth_relay_url: String,
    /// Domain the sign-in proofs must be bound to
    pub auth_domain: String,
    /// Public base URL of this deployment, used for canonical board links
    pub public_base_url: String,
    /// Whether `GET /boards/{fid}` is public or requires proof of ownership
    pub public_fid_listing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            host: [127, 0, 0, 1],
            allowed_origins: None, // None = allow all (dev mode)
            body_limit_mb: 2,
            timeout_secs: 30,
            rate_limit_enabled: false, // Disabled by default (for tests)
            rate_limit_per_sec: 10,
            rate_limit_burst: 20,
            database_url: None,
            database_max_connections: 10,
            pinata_jwt: None,
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            gateway_url: None,
            upload_url_ttl_secs: 60,
            auth_relay_url: DEFAULT_AUTH_RELAY_URL.to_string(),
            auth_domain: "localhost:3000".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            public_fid_listing: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .map(|h| {
                if h == "0.0.0.0" {
                    [0, 0, 0, 0]
                } else {
                    [127, 0, 0, 1]
                }
            })
            .unwrap_or([127, 0, 0, 1]);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let body_limit_mb = std::env::var("BODY_LIMIT_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Rate limiting enabled by default in production, can be disabled with RATE_LIMIT_ENABLED=false
        let rate_limit_enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let rate_limit_per_sec = std::env::var("RATE_LIMIT_PER_SEC")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let rate_limit_burst = std::env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let pinata_jwt = std::env::var("PINATA_JWT").ok().filter(|v| !v.is_empty());

        let upload_endpoint = std::env::var("UPLOAD_ENDPOINT")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_ENDPOINT.to_string());

        let gateway_url = std::env::var("GATEWAY_URL").ok().filter(|v| !v.is_empty());

        let upload_url_ttl_secs = std::env::var("UPLOAD_URL_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let auth_relay_url = std::env::var("AUTH_RELAY_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_RELAY_URL.to_string());

        let auth_domain = std::env::var("AUTH_DOMAIN")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "localhost:3000".to_string());

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let public_fid_listing = std::env::var("PUBLIC_FID_LISTING")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            port,
            host,
            allowed_origins,
            body_limit_mb,
            timeout_secs,
            rate_limit_enabled,
            rate_limit_per_sec,
            rate_limit_burst,
            database_url,
            database_max_connections,
            pinata_jwt,
            upload_endpoint,
            gateway_url,
            upload_url_ttl_secs,
            auth_relay_url,
            auth_domain,
            public_base_url,
            public_fid_listing,
        }
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.upload_url_ttl_secs, 60);
        assert!(config.database_url.is_none());
        assert!(config.pinata_jwt.is_none());
        assert!(config.public_fid_listing);
        assert!(!config.rate_limit_enabled);
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }
}
