//! Tenant access token handling.
//!
//! Requests are authorised with a tenant access token exchanged from the
//! app's id and secret. The token is fetched on first use and cached until
//! shortly before the expiry the server reports.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use feishu_sheets_protocol::{Endpoints, TenantTokenRequest, TenantTokenResponse};
use once_cell::sync::OnceCell;

use crate::config::{APP_ID_ENV, APP_SECRET_ENV};
use crate::error::{ClientError, Result};
use crate::transport::{HttpRequest, Transport};

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Cached tokens are treated as expired this long before the server says so.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// App credentials for the token exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Read `FEISHU_APP_ID` and `FEISHU_APP_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ClientError::MissingEnv(key))
        };
        Ok(Self::new(var(APP_ID_ENV)?, var(APP_SECRET_ENV)?))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

enum TokenSource {
    App(Credentials),
    Static(String),
}

struct CachedToken {
    token: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at.map_or(true, |at| Instant::now() < at)
    }
}

/// Supplies the tenant access token for every request.
pub struct Auth {
    source: TokenSource,
    cached: Mutex<Option<CachedToken>>,
}

impl Auth {
    /// Exchange app credentials for tokens on demand
    pub fn new(credentials: Credentials) -> Self {
        Self {
            source: TokenSource::App(credentials),
            cached: Mutex::new(None),
        }
    }

    /// Always use the given token; the token endpoint is never called
    pub fn with_static_token(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
            cached: Mutex::new(None),
        }
    }

    pub fn app_id(&self) -> Option<&str> {
        match &self.source {
            TokenSource::App(c) => Some(&c.app_id),
            TokenSource::Static(_) => None,
        }
    }

    /// Return the cached token, fetching a new one when there is none or it expired
    pub fn tenant_access_token(
        &self,
        transport: &dyn Transport,
        endpoints: &Endpoints,
    ) -> Result<String> {
        let credentials = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::App(credentials) => credentials,
        };

        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.token.clone());
        }

        let fresh = fetch_token(transport, endpoints, credentials)?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token so the next request fetches a new one
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Headers carrying the token
    pub fn headers(token: &str) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
        ]
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            TokenSource::App(c) => format!("app {}", c.app_id),
            TokenSource::Static(_) => "static token".to_string(),
        };
        f.debug_struct("Auth").field("source", &source).finish()
    }
}

fn fetch_token(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<CachedToken> {
    let body = serde_json::to_value(TenantTokenRequest {
        app_id: credentials.app_id.clone(),
        app_secret: credentials.app_secret.clone(),
    })?;
    let request = HttpRequest::post(endpoints.tenant_access_token(), body)
        .header("Content-Type", CONTENT_TYPE_JSON);

    let response = transport.send(request).map_err(|e| {
        tracing::error!("Could not obtain a tenant access token: {e}");
        ClientError::Auth(e.to_string())
    })?;

    let parsed: TenantTokenResponse = response.json()?;
    if !parsed.envelope.is_ok() {
        let reason = format!(
            "code {}: {}",
            parsed.envelope.code.unwrap_or_default(),
            parsed.envelope.msg.unwrap_or_default()
        );
        tracing::error!("Token exchange rejected: {reason}");
        return Err(ClientError::Auth(reason));
    }

    let token = parsed
        .tenant_access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::Auth("response has no tenant_access_token".into()))?;

    tracing::info!(
        app_id = %credentials.app_id,
        expire = ?parsed.expire,
        "Obtained tenant access token"
    );

    Ok(CachedToken {
        token,
        expires_at: parsed
            .expire
            .map(|secs| Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN)),
    })
}

/// Process-wide [`Auth`] built from the environment on first use
pub fn default_auth() -> Result<Arc<Auth>> {
    static DEFAULT: OnceCell<Arc<Auth>> = OnceCell::new();
    DEFAULT
        .get_or_try_init(|| Credentials::from_env().map(|c| Arc::new(Auth::new(c))))
        .cloned()
}
