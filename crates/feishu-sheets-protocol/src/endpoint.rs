//! REST endpoint URLs.

/// Base URL of the Feishu open platform API.
pub const DEFAULT_BASE_URL: &str = "https://open.feishu.cn/open-apis/";

/// Builds endpoint URLs relative to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// A trailing `/` is added to `base_url` when missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn tenant_access_token(&self) -> String {
        format!("{}auth/v3/tenant_access_token/internal/", self.base)
    }

    pub fn values_read(&self, spreadsheet_token: &str, sheet_id: &str) -> String {
        format!(
            "{}sheets/v2/spreadsheets/{}/values/{}",
            self.base, spreadsheet_token, sheet_id
        )
    }

    pub fn values_write(&self, spreadsheet_token: &str) -> String {
        format!("{}sheets/v2/spreadsheets/{}/values/", self.base, spreadsheet_token)
    }

    pub fn values_image(&self, spreadsheet_token: &str) -> String {
        format!(
            "{}sheets/v2/spreadsheets/{}/values_image",
            self.base, spreadsheet_token
        )
    }

    pub fn media_download(&self, file_token: &str) -> String {
        format!("{}drive/v1/medias/{}/download", self.base, file_token)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
