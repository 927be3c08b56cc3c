// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdeck_api::models::{DeviceListParams, DeviceRecord, WarehouseListParams};
use fleetdeck_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = server.uri().parse().unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base);
    (server, client)
}

fn device_json(id: &str, imei: &str) -> serde_json::Value {
    json!({
        "id": id,
        "imei": imei,
        "qrCode": format!("QR-{imei}"),
        "locationType": "WAREHOUSE",
        "warehouseId": "wh-1",
        "warehouseName": "Central",
        "movements": [],
        "createdAt": "2025-11-02T10:00:00Z",
        "updatedAt": "2025-11-02T10:00:00Z"
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_pagination() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [device_json("d1", "350000000000001"), device_json("d2", "350000000000002")],
        "message": "ok",
        "maxPage": 4
    });

    Mock::given(method("GET"))
        .and(path("/device/list"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "350"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let params = DeviceListParams {
        search: Some("350".into()),
        offset: 20,
        limit: 10,
        field_engineer_id: None,
        location_type: None,
    };

    let page = client.list_devices(&params).await.unwrap();

    assert_eq!(page.max_page, 4);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].imei, "350000000000001");
    assert_eq!(page.rows[1].id, "d2");
    assert_eq!(page.rows[0].warehouse_name.as_deref(), Some("Central"));
}

#[tokio::test]
async fn test_list_devices_missing_max_page_defaults_to_zero() {
    let (server, client) = setup().await;

    // No maxPage field at all — must come back as zero pages, not an error.
    let body = json!({ "data": [], "message": "ok" });

    Mock::given(method("GET"))
        .and(path("/device/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let params = DeviceListParams {
        offset: 0,
        limit: 10,
        ..Default::default()
    };
    let page = client.list_devices(&params).await.unwrap();

    assert_eq!(page.max_page, 0);
    assert!(page.rows.is_empty());
}

#[tokio::test]
async fn test_list_warehouses_filters() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [{
            "id": "wh-9",
            "code": "WH-PUN-01",
            "name": "Pune Regional",
            "warehouseType": "REGIONAL",
            "ownerType": "AGGREGATOR",
            "aggregatorId": "agg-3",
            "city": "Pune",
            "status": "ACTIVE"
        }],
        "maxPage": 1
    });

    Mock::given(method("GET"))
        .and(path("/warehouse/list"))
        .and(query_param("warehouseType", "REGIONAL"))
        .and(query_param("warehouseOwnerType", "AGGREGATOR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let params = WarehouseListParams {
        offset: 0,
        limit: 10,
        warehouse_type: Some("REGIONAL".into()),
        warehouse_owner_type: Some("AGGREGATOR".into()),
        ..Default::default()
    };
    let page = client.list_warehouses(&params).await.unwrap();

    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].code, "WH-PUN-01");
    assert_eq!(page.rows[0].aggregator_id.as_deref(), Some("agg-3"));
}

#[tokio::test]
async fn test_read_device() {
    let (server, client) = setup().await;

    let body = json!({ "data": device_json("d7", "350000000000007"), "message": "ok" });

    Mock::given(method("GET"))
        .and(path("/device/read/d7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let device = client.read_device("d7").await.unwrap();

    assert_eq!(device.id, "d7");
    assert_eq!(device.imei, "350000000000007");
    assert_eq!(device.location_type.as_deref(), Some("WAREHOUSE"));
}

#[tokio::test]
async fn test_create_device_sends_full_payload() {
    let (server, client) = setup().await;

    let response = json!({ "data": device_json("d-new", "350000000000042") });

    Mock::given(method("POST"))
        .and(path("/device/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let payload = DeviceRecord {
        imei: "350000000000042".into(),
        qr_code: Some("QR-42".into()),
        location_type: Some("PRODUCTION_FLOOR".into()),
        production_floor: Some("Floor A".into()),
        ..Default::default()
    };

    let created = client.create_device(&payload).await.unwrap();
    assert_eq!(created.id, "d-new");
}

#[tokio::test]
async fn test_delete_warehouse() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/warehouse/delete/wh-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    client.delete_warehouse("wh-3").await.unwrap();
}

#[tokio::test]
async fn test_list_aggregators() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [
            { "id": "agg-1", "name": "Northline Logistics" },
            { "id": "agg-2", "name": "Sahyadri Fleet Co" },
        ],
        "maxPage": 1
    });

    Mock::given(method("GET"))
        .and(path("/aggregator/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.list_aggregators().await.unwrap();
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[1].name, "Sahyadri Fleet Co");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_message_extracted_from_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/device/delete/d1"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "Device has open movements" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_device("d1").await.unwrap_err();

    match err {
        Error::Api { ref message, status } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Device has open movements");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(err.display_message(), "Device has open movements");
}

#[tokio::test]
async fn test_error_body_without_message_falls_back_to_default() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/warehouse/read/missing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.read_warehouse("missing").await.unwrap_err();

    assert_eq!(
        err.display_message(),
        fleetdeck_api::error::DEFAULT_ERROR_MESSAGE
    );
}

#[tokio::test]
async fn test_not_found_predicate() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/read/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let err = client.read_device("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_record_envelope_without_data_is_an_error() {
    let (server, client) = setup().await;

    // 200 with no data field — the service reports business failures this way.
    Mock::given(method("POST"))
        .and(path("/device/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "IMEI already exists" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_device(&DeviceRecord::default())
        .await
        .unwrap_err();

    assert_eq!(err.display_message(), "IMEI already exists");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/device/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let params = DeviceListParams {
        offset: 0,
        limit: 10,
        ..Default::default()
    };
    let err = client.list_devices(&params).await.unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }));
}
