use actix_web::{
    http::{Method, StatusCode},
    web,
    web::ServiceConfig,
};
use serde_json::Value;

use super::helpers::{get_request, json_request};
use crate::{data_objects::ChainStatus, routes::health};

fn configure(chain: ChainStatus) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(health).app_data(web::Data::new(chain));
    }
}

#[actix_web::test]
async fn health_without_contract() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/health", configure(ChainStatus::default())).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["contractInitialized"], false);
    assert!(body["contractAddress"].is_null());
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn health_with_contract() {
    let _ = env_logger::try_init().ok();
    let chain = ChainStatus {
        contract_initialized: true,
        contract_address: Some("0xe7f1725e7734ce288f8367e1bb143e90bb3f0512".to_string()),
    };
    let (status, body) = get_request("/health", configure(chain)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["contractInitialized"], true);
    assert_eq!(body["contractAddress"], "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512");
}

#[actix_web::test]
async fn unknown_route() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/nope", configure(ChainStatus::default())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Route not found","path":"/api/nope"}"#);
}

#[actix_web::test]
async fn wrong_method() {
    let _ = env_logger::try_init().ok();
    let (status, body) = json_request(Method::POST, "/health", "{}", configure(ChainStatus::default())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Route not found","path":"/health"}"#);
}
