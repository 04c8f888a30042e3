mod common;

use common::*;
use feishu_sheets_client::{ClientError, Method};
use feishu_sheets_core::{CellAddress, CellRange, CellValue, Image, Selection};
use pretty_assertions::assert_eq;
use serde_json::json;

fn t(s: &str) -> CellValue {
    CellValue::text(s)
}

#[test]
fn test_nothing_fetched_until_read() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    assert!(!sheet.is_loaded());
    assert_eq!(transport.request_count(), 0);

    transport.push_json(read_response(sample_values()));
    assert_eq!(sheet.rows().unwrap(), 3);
    assert_eq!(sheet.cols().unwrap(), 3);
    assert!(sheet.is_loaded());

    let request = transport.last();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, read_url());
    assert_eq!(request.header_value("Authorization"), Some("Bearer t-test"));
}

#[test]
fn test_data_is_fetched_once() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();
    sheet.get("B2:C3").unwrap();
    sheet.cell("A3").unwrap();
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn test_get_decodes_cells() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));

    assert_eq!(sheet.get("A2").unwrap(), Selection::Value(t("ada")));
    assert_eq!(sheet.get("b2").unwrap(), Selection::Value(CellValue::Number(42.0)));
    assert_eq!(
        sheet.get("C2").unwrap(),
        Selection::Value(CellValue::Image(Image::from_token("boxcnADA")))
    );
    assert_eq!(
        sheet.cell("C3").unwrap(),
        &CellValue::formula("=B2*2")
    );
}

#[test]
fn test_get_ranges() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));

    assert_eq!(
        sheet.get("A1:B2").unwrap(),
        Selection::Rows(vec![vec![t("name"), t("score")], vec![t("ada"), CellValue::Number(42.0)]])
    );
    assert_eq!(
        sheet.get("A1:A3").unwrap(),
        Selection::Column(vec![t("name"), t("ada"), t("bob")])
    );
    assert_eq!(
        sheet.get("B3:D9").unwrap(),
        Selection::Rows(vec![vec![CellValue::Number(7.5), CellValue::formula("=B2*2")]])
    );
}

#[test]
fn test_get_out_of_bounds_and_bad_index() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    assert!(matches!(sheet.get("3B"), Err(ClientError::Core(_))));
    assert_eq!(transport.request_count(), 0);

    transport.push_json(read_response(sample_values()));
    assert!(matches!(sheet.get("Z99"), Err(ClientError::Core(_))));
    assert!(matches!(sheet.cell("A1:B2"), Err(ClientError::NotSingleCell(_))));
}

#[test]
fn test_set_text_without_loading() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    sheet.set("B3", "hello").unwrap();

    assert_eq!(transport.request_count(), 1);
    assert!(!sheet.is_loaded());

    let request = transport.last();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, write_url());
    assert_eq!(
        request.body,
        Some(json!({"valueRange": {"range": "0b12ab!B3:B3", "values": [["hello"]]}}))
    );
}

#[test]
fn test_set_formula() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    sheet.set("C1", CellValue::formula("=SUM(B2:B3)")).unwrap();

    assert_eq!(
        transport.last().body,
        Some(json!({"valueRange": {
            "range": "0b12ab!C1:C1",
            "values": [[{"type": "formula", "text": "=SUM(B2:B3)"}]]
        }}))
    );
}

#[test]
fn test_set_image_uses_image_endpoint() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    sheet.set("D2", Image::from_bytes(b"hi".to_vec())).unwrap();

    assert_eq!(transport.request_count(), 1);
    let request = transport.last();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, image_url());

    let body = request.body.unwrap();
    assert_eq!(body["range"], "0b12ab!D2:D2");
    assert_eq!(body["image"], "aGk=");
    assert!(body["name"].as_str().unwrap().ends_with(".png"));
}

#[test]
fn test_set_image_from_path_keeps_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.jpg");
    std::fs::write(&path, b"jpg!").unwrap();

    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    sheet.set("A1", Image::from_path(&path)).unwrap();

    let body = transport.last().body.unwrap();
    assert_eq!(body["name"], "logo.jpg");
    assert_eq!(body["image"], "anBnIQ==");
}

#[test]
fn test_copying_remote_image_downloads_it_first() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_bytes(b"hi");
    transport.push_ok();
    sheet.set("A1", Image::from_token("boxcnSRC")).unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].url, media_url("boxcnSRC"));
    assert_eq!(requests[1].url, image_url());
    assert_eq!(requests[1].body.as_ref().unwrap()["image"], "aGk=");
}

#[test]
fn test_set_updates_loaded_cache() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();

    transport.push_ok();
    sheet.set("B2", 43).unwrap();
    assert_eq!(sheet.get("B2").unwrap(), Selection::Value(CellValue::Number(43.0)));

    transport.push_ok();
    sheet.set("A3", Image::from_bytes(vec![1])).unwrap();
    assert!(sheet.cell("A3").unwrap().is_image());

    assert_eq!(transport.request_count(), 3);
}

#[test]
fn test_set_outside_cache_leaves_it_alone() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();

    transport.push_ok();
    sheet.set("E9", "far away").unwrap();

    assert_eq!(sheet.rows().unwrap(), 3);
    assert_eq!(sheet.cols().unwrap(), 3);
    assert!(sheet.get("E9").is_err());
}

#[test]
fn test_set_rejects_multi_cell_index() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    let err = sheet.set("A1:B2", 1).unwrap_err();
    assert!(matches!(err, ClientError::NotSingleCell(_)));
    assert_eq!(transport.request_count(), 0);

    transport.push_ok();
    sheet.set("A1:A1", 1).unwrap();
}

#[test]
fn test_set_range_mixed_values() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();

    transport.push_ok();
    transport.push_ok();
    sheet
        .set_range(
            "B2:C3",
            vec![
                vec![CellValue::from(1), CellValue::Image(Image::from_bytes(b"hi".to_vec()))],
                vec![CellValue::formula("=B2+1"), CellValue::from(true)],
            ],
        )
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(
        requests[1].body,
        Some(json!({"valueRange": {
            "range": "0b12ab!B2:C3",
            "values": [[1, ""], [{"type": "formula", "text": "=B2+1"}, true]]
        }}))
    );
    assert_eq!(requests[2].method, Method::Post);
    assert_eq!(requests[2].body.as_ref().unwrap()["range"], "0b12ab!C2:C2");

    assert_eq!(
        sheet.get("B2:C3").unwrap(),
        Selection::Rows(vec![
            vec![CellValue::Number(1.0), CellValue::Image(Image::from_bytes(b"hi".to_vec()))],
            vec![CellValue::formula("=B2+1"), CellValue::Boolean(true)],
        ])
    );
}

#[test]
fn test_set_range_of_formulas_is_written() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    sheet
        .set_range(
            "D1:D2",
            vec![vec![CellValue::formula("=1")], vec![CellValue::formula("=2")]],
        )
        .unwrap();
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.last().method, Method::Put);
}

#[test]
fn test_set_range_of_images_skips_value_write() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_ok();
    transport.push_ok();
    sheet
        .set_range(
            "A1:B1",
            vec![vec![
                CellValue::Image(Image::from_bytes(vec![1])),
                CellValue::Image(Image::from_bytes(vec![2])),
            ]],
        )
        .unwrap();

    let requests = transport.requests();
    assert!(requests.iter().all(|r| r.method == Method::Post));
    assert_eq!(requests[0].body.as_ref().unwrap()["range"], "0b12ab!A1:A1");
    assert_eq!(requests[1].body.as_ref().unwrap()["range"], "0b12ab!B1:B1");
}

#[test]
fn test_set_range_shape_mismatch_sends_nothing() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    let err = sheet
        .set_range("A1:B2", vec![vec![t("only"), t("one row")]])
        .unwrap_err();
    assert!(matches!(err, ClientError::Core(_)));
    assert_eq!(
        err.to_string(),
        "Range A1:B2 expects 2x2 values, got 1x2"
    );
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_read_without_data_fails() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_json(json!({"code": 0, "msg": "sheet is empty"}));
    match sheet.get("A1").unwrap_err() {
        ClientError::ReadFailed { sheet, reason } => {
            assert_eq!(sheet, SHEET);
            assert_eq!(reason, "sheet is empty");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!sheet.is_loaded());
}

#[test]
fn test_read_api_error() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_json(json!({"code": 90215, "msg": "sheet id not found"}));
    assert!(matches!(
        sheet.get("A1"),
        Err(ClientError::Api { code: 90215, .. })
    ));
}

#[test]
fn test_write_failure_is_wrapped() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_status(400, "bad range");
    match sheet.set("A1", 1).unwrap_err() {
        ClientError::WriteFailed { range, source } => {
            assert_eq!(range, "0b12ab!A1:A1");
            assert!(matches!(*source, ClientError::Transport(ref e) if e.status() == Some(400)));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    transport.push_json(json!({"code": 90001, "msg": "no permission"}));
    let err = sheet.set("A1", Image::from_bytes(vec![1])).unwrap_err();
    assert!(matches!(err, ClientError::ImageWriteFailed { .. }));
}

#[test]
fn test_failed_write_keeps_cache() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();

    transport.push_status(500, "oops");
    assert!(sheet.set("A1", "changed").is_err());
    assert_eq!(sheet.get("A1").unwrap(), Selection::Value(t("name")));
}

#[test]
fn test_refresh_and_invalidate() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    transport.push_json(read_response(sample_values()));
    sheet.get("A1").unwrap();

    transport.push_json(read_response(json!([["fresh"]])));
    assert_eq!(sheet.refresh().unwrap().row_count(), 1);
    assert_eq!(sheet.get("A1").unwrap(), Selection::Value(t("fresh")));

    sheet.invalidate();
    assert!(!sheet.is_loaded());
    transport.push_json(read_response(sample_values()));
    assert_eq!(sheet.rows().unwrap(), 3);
    assert_eq!(transport.request_count(), 3);
    assert_eq!(transport.pending(), 0);
}

#[test]
fn test_typed_indices() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);
    transport.push_json(read_response(sample_values()));

    let a2 = CellAddress::new(1, 0);
    let b3 = CellAddress::new(2, 1);
    assert_eq!(sheet.get(a2).unwrap(), Selection::Value(t("ada")));
    assert_eq!(
        sheet.get((a2, b3)).unwrap(),
        Selection::Rows(vec![
            vec![t("ada"), CellValue::Number(42.0)],
            vec![t("bob"), CellValue::Number(7.5)],
        ])
    );
}

#[test]
fn test_typed_indices_outside_grid_send_nothing() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut sheet = client.sheet(SPREADSHEET, SHEET);

    let err = sheet.set(CellAddress::new(5_000_000, 20_000), 1).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Core(feishu_sheets_core::Error::RowOutOfBounds(5_000_000, _))
    ));

    let tall = CellRange::new(CellAddress::new(0, 0), CellAddress::new(u32::MAX, 0));
    let err = sheet.set_range(tall, vec![vec![CellValue::Empty]]).unwrap_err();
    assert!(matches!(err, ClientError::Core(_)));
    assert_eq!(transport.request_count(), 0);
}
