//! Client configuration.

use std::time::Duration;

use feishu_sheets_protocol::{Endpoints, DEFAULT_BASE_URL};

/// Overrides [`ClientConfig::base_url`] (e.g. for Lark: `https://open.larksuite.com/open-apis/`).
pub const BASE_URL_ENV: &str = "FEISHU_BASE_URL";

/// Request timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "FEISHU_TIMEOUT_SECS";

/// App id used for the tenant access token.
pub const APP_ID_ENV: &str = "FEISHU_APP_ID";

/// App secret used for the tenant access token.
pub const APP_SECRET_ENV: &str = "FEISHU_APP_SECRET";

/// Configuration for the sheets client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the open platform API. Endpoint paths are appended to it.
    pub base_url: String,

    /// Timeout for each HTTP request.
    pub timeout: Duration,

    /// `User-Agent` header sent by the default transport.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("feishu-sheets/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `FEISHU_BASE_URL` and `FEISHU_TIMEOUT_SECS` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        match lookup(TIMEOUT_ENV).map(|s| s.trim().parse::<u64>()) {
            Some(Ok(secs)) => config.timeout = Duration::from_secs(secs),
            Some(Err(e)) => tracing::warn!("Ignoring invalid {TIMEOUT_ENV}: {e}"),
            None => {}
        }

        config
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.clone())
    }
}
