use actix_web::{
    http::{Method, StatusCode},
    web,
    web::ServiceConfig,
};
use paylink_engine::{db_types::NewMerchant, traits::StorageError, MerchantApi};

use super::{
    helpers::{get_request, json_request, merchant, MERCHANT},
    mocks::MockPaylinkDatabase,
};
use crate::routes::{MerchantRoute, OnboardMerchantRoute, UpdateWebhookRoute};

fn configure(db: MockPaylinkDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = MerchantApi::new(db, false);
        cfg.service(OnboardMerchantRoute::<MockPaylinkDatabase>::new())
            .service(MerchantRoute::<MockPaylinkDatabase>::new())
            .service(UpdateWebhookRoute::<MockPaylinkDatabase>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn onboard_new_merchant() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().times(1).returning(|_| Ok(None));
    db.expect_insert_merchant().times(1).returning(|m: NewMerchant| {
        let mut merchant = merchant(None);
        merchant.wallet_address = m.wallet_address;
        merchant.webhook_url = m.webhook_url;
        Ok(merchant)
    });
    let body = r#"{"walletAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3", "webhookUrl": "https://shop.example.com/hook"}"#;
    let (status, body) = json_request(Method::POST, "/merchants/onboard", body, configure(db)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        r#"{"message":"Merchant onboarded successfully","merchant":{"walletAddress":"0x5fbdb2315678afecb367f032d93f642f64180aa3","webhookUrl":"https://shop.example.com/hook","isActive":true}}"#
    );
}

#[actix_web::test]
async fn onboard_existing_merchant() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().times(1).returning(|_| Ok(Some(merchant(Some("https://old.example.com")))));
    db.expect_insert_merchant().never();
    db.expect_update_webhook_url().never();
    let body = format!(r#"{{"walletAddress": "{MERCHANT}"}}"#);
    let (status, body) = json_request(Method::POST, "/merchants/onboard", &body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"message":"Merchant already exists","merchant":{"walletAddress":"0x5fbdb2315678afecb367f032d93f642f64180aa3","webhookUrl":"https://old.example.com","isActive":true}}"#
    );
}

#[actix_web::test]
async fn onboard_existing_merchant_with_new_webhook() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().times(1).returning(|_| Ok(Some(merchant(None))));
    db.expect_update_webhook_url()
        .withf(|_, url| url.as_deref() == Some("https://new.example.com/hook"))
        .times(1)
        .returning(|_, url| {
            let mut m = merchant(None);
            m.webhook_url = url;
            Ok(Some(m))
        });
    let body = format!(r#"{{"walletAddress": "{MERCHANT}", "webhookUrl": "https://new.example.com/hook"}}"#);
    let (status, body) = json_request(Method::POST, "/merchants/onboard", &body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""webhookUrl":"https://new.example.com/hook""#), "{body}");
}

#[actix_web::test]
async fn onboard_losing_an_insert_race() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    // The first lookup misses; another request inserts the merchant before this one does
    let mut lookups = 0;
    db.expect_fetch_merchant().times(2).returning(move |_| {
        lookups += 1;
        Ok((lookups > 1).then(|| merchant(None)))
    });
    db.expect_insert_merchant()
        .times(1)
        .returning(|_| Err(StorageError::UniqueViolation("merchants.wallet_address".into())));
    let body = format!(r#"{{"walletAddress": "{MERCHANT}"}}"#);
    let (status, body) = json_request(Method::POST, "/merchants/onboard", &body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"message":"Merchant already exists","merchant":{"walletAddress":"0x5fbdb2315678afecb367f032d93f642f64180aa3","webhookUrl":null,"isActive":true}}"#
    );
}

#[actix_web::test]
async fn onboard_without_wallet_address() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().never();
    let (status, body) = json_request(Method::POST, "/merchants/onboard", "{}", configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Wallet address is required"}"#);
}

#[actix_web::test]
async fn onboard_with_bad_address() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().never();
    let body = r#"{"walletAddress": "0x1234"}"#;
    let (status, body) = json_request(Method::POST, "/merchants/onboard", body, configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid wallet address format"}"#);
}

#[actix_web::test]
async fn onboard_with_bad_webhook_url() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().never();
    let body = format!(r#"{{"walletAddress": "{MERCHANT}", "webhookUrl": "ftp://shop.example.com"}}"#);
    let (status, body) = json_request(Method::POST, "/merchants/onboard", &body, configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Invalid webhook URL: ftp://shop.example.com"#), "{body}");
}

#[actix_web::test]
async fn onboard_with_malformed_json() {
    let _ = env_logger::try_init().ok();
    let db = MockPaylinkDatabase::new();
    let (status, body) = json_request(Method::POST, "/merchants/onboard", "{walletAddress", configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#), "{body}");
}

#[actix_web::test]
async fn fetch_merchant() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant()
        .withf(|addr| addr.as_str() == MERCHANT)
        .times(1)
        .returning(|_| Ok(Some(merchant(Some("https://shop.example.com/hook")))));
    let path = "/merchants/0x5FBDB2315678AFECB367F032D93F642F64180AA3";
    let (status, body) = get_request(path, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"walletAddress":"0x5fbdb2315678afecb367f032d93f642f64180aa3","webhookUrl":"https://shop.example.com/hook","isActive":true,"createdAt":"2024-06-01T12:00:00Z"}"#
    );
}

#[actix_web::test]
async fn fetch_unknown_merchant() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().times(1).returning(|_| Ok(None));
    let (status, body) = get_request(&format!("/merchants/{MERCHANT}"), configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Merchant not found"}"#);
}

#[actix_web::test]
async fn fetch_merchant_with_bad_address() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_fetch_merchant().never();
    let (status, body) = get_request("/merchants/not-an-address", configure(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid wallet address format"}"#);
}

#[actix_web::test]
async fn update_webhook() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_update_webhook_url().times(1).returning(|_, url| {
        let mut m = merchant(None);
        m.webhook_url = url;
        Ok(Some(m))
    });
    let path = format!("/merchants/{MERCHANT}/webhook");
    let body = r#"{"webhookUrl": "https://shop.example.com/paid"}"#;
    let (status, body) = json_request(Method::PUT, &path, body, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"message":"Webhook URL updated successfully","webhookUrl":"https://shop.example.com/paid"}"#
    );
}

#[actix_web::test]
async fn clear_webhook() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_update_webhook_url().withf(|_, url| url.is_none()).times(1).returning(|_, _| Ok(Some(merchant(None))));
    let path = format!("/merchants/{MERCHANT}/webhook");
    let (status, body) = json_request(Method::PUT, &path, r#"{"webhookUrl": ""}"#, configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"Webhook URL updated successfully","webhookUrl":null}"#);
}

#[actix_web::test]
async fn update_webhook_for_unknown_merchant() {
    let _ = env_logger::try_init().ok();
    let mut db = MockPaylinkDatabase::new();
    db.expect_update_webhook_url().times(1).returning(|_, _| Ok(None));
    let path = format!("/merchants/{MERCHANT}/webhook");
    let body = r#"{"webhookUrl": "https://shop.example.com/paid"}"#;
    let (status, body) = json_request(Method::PUT, &path, body, configure(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Merchant not found"}"#);
}
