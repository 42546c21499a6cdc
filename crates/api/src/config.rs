use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the webhook verify token, which must be set explicitly in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret echoed back by the platform during the verification
    /// handshake (`WEBHOOK_VERIFY_TOKEN`).
    pub webhook_verify_token: String,
    /// Optional app secret for HMAC-SHA256 payload signatures
    /// (`WEBHOOK_APP_SECRET`). When unset, delivery signatures are not
    /// checked.
    pub webhook_app_secret: Option<String>,
    /// Base URL of the platform lead API (`PLATFORM_API_BASE_URL`).
    pub platform_api_base_url: String,
    /// Timeout for one outbound lead fetch in seconds
    /// (`PLATFORM_FETCH_TIMEOUT_SECS`, default `10`). A stalled fetch
    /// becomes a per-lead fetch failure, never a hung batch.
    pub platform_fetch_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                          |
    /// |-------------------------------|----------------------------------|
    /// | `HOST`                        | `0.0.0.0`                        |
    /// | `PORT`                        | `3000`                           |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                             |
    /// | `WEBHOOK_VERIFY_TOKEN`        | `dev-verify-token`               |
    /// | `WEBHOOK_APP_SECRET`          | unset                            |
    /// | `PLATFORM_API_BASE_URL`       | `https://graph.facebook.com/v19.0` |
    /// | `PLATFORM_FETCH_TIMEOUT_SECS` | `10`                             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let webhook_verify_token = std::env::var("WEBHOOK_VERIFY_TOKEN")
            .unwrap_or_else(|_| "dev-verify-token".into());

        let webhook_app_secret = std::env::var("WEBHOOK_APP_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let platform_api_base_url = std::env::var("PLATFORM_API_BASE_URL")
            .unwrap_or_else(|_| "https://graph.facebook.com/v19.0".into());

        let platform_fetch_timeout_secs: u64 = std::env::var("PLATFORM_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PLATFORM_FETCH_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            webhook_verify_token,
            webhook_app_secret,
            platform_api_base_url,
            platform_fetch_timeout_secs,
        }
    }

    /// The outbound lead-fetch timeout as a [`Duration`].
    pub fn platform_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.platform_fetch_timeout_secs)
    }
}
