use carlog::api::{ApiError, CarApi, CarRecord, CarResource};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn sample_car_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "brand": "Toyota",
        "model": "Corolla",
        "mileage": 56000.0,
        "createdAt": "2024-06-15T04:30:00Z"
    })
}

fn client_for(server: &MockServer) -> CarApi {
    CarApi::new(server.uri())
}

// ============================================================================
// Request Shape (one test per operation: exact method + path)
// ============================================================================

#[tokio::test]
async fn test_list_cars_gets_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([sample_car_json("car-1"), sample_car_json("car-2")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cars = client_for(&server).list_cars().await.unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[0].brand, "Toyota");
}

#[tokio::test]
async fn test_get_car_gets_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/car-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_car_json("car-1")))
        .expect(1)
        .mount(&server)
        .await;

    let car = client_for(&server).get_car("car-1").await.unwrap();
    assert_eq!(car.id.as_deref(), Some("car-1"));
    assert_eq!(car.mileage, Some(56000.0));
}

#[tokio::test]
async fn test_cars_by_brand_gets_brand_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/brand/Toyota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_car_json("car-1")])))
        .expect(1)
        .mount(&server)
        .await;

    let cars = client_for(&server)
        .cars_by_brand("Toyota")
        .await
        .unwrap();
    assert_eq!(cars.len(), 1);
}

#[tokio::test]
async fn test_create_car_posts_collection_with_record_body() {
    let server = MockServer::start().await;
    // The new record has no id yet; the body must omit it entirely
    Mock::given(method("POST"))
        .and(path("/api/cars"))
        .and(body_json(json!({"brand": "Toyota", "model": "Corolla"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_car_json("car-9")))
        .expect(1)
        .mount(&server)
        .await;

    let car = CarRecord::new("Toyota", "Corolla");
    let created = client_for(&server).create_car(&car).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("car-9"));
}

#[tokio::test]
async fn test_update_car_puts_id_path_with_record_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/cars/car-1"))
        .and(body_json(json!({
            "id": "car-1",
            "brand": "Toyota",
            "model": "Corolla",
            "mileage": 60000.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_car_json("car-1")))
        .expect(1)
        .mount(&server)
        .await;

    let car = CarRecord {
        id: Some("car-1".to_string()),
        mileage: Some(60000.0),
        ..CarRecord::new("Toyota", "Corolla")
    };
    let updated = client_for(&server)
        .update_car("car-1", &car)
        .await
        .unwrap();
    assert_eq!(updated.id.as_deref(), Some("car-1"));
}

#[tokio::test]
async fn test_delete_car_deletes_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/cars/car-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_car("car-1").await.unwrap();
}

// ============================================================================
// Error Propagation (the client classifies, callers interpret)
// ============================================================================

#[tokio::test]
async fn test_server_error_propagates_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(500).set_body_string("获取车辆信息失败"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_cars().await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("获取车辆信息失败"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_propagates_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("车辆信息不存在"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_car("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens here; the connection itself fails
    let api = CarApi::new("http://127.0.0.1:1");
    let err = api.list_cars().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_cars().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
