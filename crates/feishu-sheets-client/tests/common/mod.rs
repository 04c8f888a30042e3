//! Shared helpers for the client integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use feishu_sheets_client::{
    Auth, Client, ClientConfig, HttpRequest, HttpResponse, Method, Transport, TransportError,
};
use serde_json::{json, Value};

pub const BASE: &str = "https://open.feishu.cn/open-apis/";
pub const SPREADSHEET: &str = "shtcnTEST";
pub const SHEET: &str = "0b12ab";

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, value: Value) {
        self.push(Ok(HttpResponse::json_ok(&value)));
    }

    pub fn push_bytes(&self, bytes: &[u8]) {
        self.push(Ok(HttpResponse::new(200, bytes.to_vec())));
    }

    pub fn push_status(&self, status: u16, body: &str) {
        self.push(Err(TransportError::Status {
            method: Method::Get,
            url: "mock".into(),
            status,
            body: body.into(),
        }));
    }

    /// Queue a successful write acknowledgement
    pub fn push_ok(&self) {
        self.push_json(json!({"code": 0, "msg": "success", "data": {}}));
    }

    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url))
    }
}

/// Client with a fixed token, so only API calls reach the transport
pub fn client(transport: &Arc<MockTransport>) -> Client {
    Client::new(
        ClientConfig::default(),
        Arc::new(Auth::with_static_token("t-test")),
        transport.clone(),
    )
}

pub fn read_url() -> String {
    format!("{BASE}sheets/v2/spreadsheets/{SPREADSHEET}/values/{SHEET}")
}

pub fn write_url() -> String {
    format!("{BASE}sheets/v2/spreadsheets/{SPREADSHEET}/values/")
}

pub fn image_url() -> String {
    format!("{BASE}sheets/v2/spreadsheets/{SPREADSHEET}/values_image")
}

pub fn media_url(file_token: &str) -> String {
    format!("{BASE}drive/v1/medias/{file_token}/download")
}

/// A successful read of the given rows
pub fn read_response(values: Value) -> Value {
    json!({
        "code": 0,
        "msg": "success",
        "data": {
            "revision": 3,
            "spreadsheetToken": SPREADSHEET,
            "valueRange": {
                "majorDimension": "ROWS",
                "range": format!("{SHEET}!A1:C3"),
                "revision": 3,
                "values": values
            }
        }
    })
}

/// The 3x3 grid most tests start from
pub fn sample_values() -> Value {
    json!([
        ["name", "score", "photo"],
        ["ada", 42, {"type": "embed-image", "fileToken": "boxcnADA"}],
        ["bob", 7.5, {"type": "formula", "text": "=B2*2"}]
    ])
}
