//! The shared client handle.

use std::fmt;
use std::sync::Arc;

use feishu_sheets_core::{ImageInspector, MagicBytesInspector};
use feishu_sheets_protocol::{Endpoints, Envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::sheet::Sheet;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Everything a request needs: configuration, credentials, the HTTP seam and
/// the image inspector.
///
/// Cloning is cheap; clones share the token cache.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    endpoints: Endpoints,
    auth: Arc<Auth>,
    transport: Arc<dyn Transport>,
    inspector: Arc<dyn ImageInspector>,
}

impl Client {
    pub fn new(config: ClientConfig, auth: Arc<Auth>, transport: Arc<dyn Transport>) -> Self {
        let endpoints = config.endpoints();
        Self {
            config,
            endpoints,
            auth,
            transport,
            inspector: Arc::new(MagicBytesInspector),
        }
    }

    /// Client configured from `FEISHU_*` environment variables, sharing the
    /// process-wide [`default_auth`](crate::auth::default_auth).
    #[cfg(feature = "reqwest")]
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env();
        let transport = crate::transport::ReqwestTransport::new(&config)?;
        Ok(Self::new(
            config,
            crate::auth::default_auth()?,
            Arc::new(transport),
        ))
    }

    /// Client with explicit credentials and the default transport
    #[cfg(feature = "reqwest")]
    pub fn with_credentials(
        config: ClientConfig,
        credentials: crate::auth::Credentials,
    ) -> Result<Self> {
        let transport = crate::transport::ReqwestTransport::new(&config)?;
        Ok(Self::new(
            config,
            Arc::new(Auth::new(credentials)),
            Arc::new(transport),
        ))
    }

    pub fn with_inspector(mut self, inspector: Arc<dyn ImageInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn inspector(&self) -> &dyn ImageInspector {
        self.inspector.as_ref()
    }

    /// Handle on one sheet of a spreadsheet. Nothing is fetched yet.
    pub fn sheet(
        &self,
        spreadsheet_token: impl Into<String>,
        sheet_id: impl Into<String>,
    ) -> Sheet {
        Sheet::new(self.clone(), spreadsheet_token, sheet_id)
    }

    /// Send a request with the auth headers attached
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let token = self
            .auth
            .tenant_access_token(self.transport.as_ref(), &self.endpoints)?;
        let request = request.headers(Auth::headers(&token));

        tracing::debug!("{} {}", request.method, request.url);
        Ok(self.transport.send(request)?)
    }

    pub fn get_json<T: DeserializeOwned>(&self, url: impl Into<String>) -> Result<T> {
        let response = self.send(HttpRequest::get(url))?;
        parse_checked(&response)
    }

    pub fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<T> {
        let response = self.send(HttpRequest::post(url, serde_json::to_value(body)?))?;
        parse_checked(&response)
    }

    pub fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<T> {
        let response = self.send(HttpRequest::put(url, serde_json::to_value(body)?))?;
        parse_checked(&response)
    }

    /// Raw response body of a GET
    pub fn get_bytes(&self, url: impl Into<String>) -> Result<Vec<u8>> {
        Ok(self.send(HttpRequest::get(url))?.body)
    }

    /// Download an uploaded media object by file token
    pub fn download_media(&self, file_token: &str) -> Result<Vec<u8>> {
        let bytes = self.get_bytes(self.endpoints.media_download(file_token))?;
        tracing::debug!("Downloaded media {file_token} ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body, rejecting a non-zero `code`
fn parse_checked<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    let envelope: Envelope = response.json()?;
    if !envelope.is_ok() {
        let code = envelope.code.unwrap_or_default();
        let msg = envelope.msg.unwrap_or_default();
        tracing::error!("API call rejected with code {code}: {msg}");
        return Err(ClientError::Api { code, msg });
    }
    Ok(response.json()?)
}
