//! Wire types for the Feishu open platform REST API.
//!
//! Only the keys the client actually needs are modelled; everything else in
//! a response is ignored. Request bodies mirror the documented shapes:
//!
//! ```text
//! POST auth/v3/tenant_access_token/internal/   {"app_id", "app_secret"}
//! GET  sheets/v2/spreadsheets/{token}/values/{sheet_id}
//! PUT  sheets/v2/spreadsheets/{token}/values/  {"valueRange": {"range", "values"}}
//! POST sheets/v2/spreadsheets/{token}/values_image  {"range", "image", "name"}
//! GET  drive/v1/medias/{file_token}/download
//! ```

pub mod cell;
pub mod endpoint;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use cell::{decode_cell, decode_grid, encode_cell, encode_cell_for_display, encode_grid};
pub use endpoint::{Endpoints, DEFAULT_BASE_URL};

/// Fields shared by every JSON response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Zero on success. Absent on some endpoints.
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.code.unwrap_or(0) == 0
    }
}

/// Body of the tenant access token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantTokenRequest {
    pub app_id: String,
    pub app_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantTokenResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Lifetime of the token in seconds.
    #[serde(default)]
    pub expire: Option<u64>,
}

/// A block of values addressed by a sheet-qualified range ("sheet!A1:B2").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// Response of the value read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Missing when the read failed.
    #[serde(default)]
    pub data: Option<ReadData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadData {
    pub value_range: ValueRange,
}

/// Body of the value write endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteValuesRequest {
    pub value_range: ValueRange,
}

impl WriteValuesRequest {
    pub fn new(range: String, values: Vec<Vec<Value>>) -> Self {
        Self {
            value_range: ValueRange {
                range,
                values,
                revision: None,
            },
        }
    }
}

/// Body of the image write endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteImageRequest {
    /// Single-cell range, "sheet!B3:B3".
    pub range: String,
    /// Base64 of the image bytes.
    pub image: String,
    pub name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Vec<Value>>>::deserialize(deserializer)?.unwrap_or_default())
}
