use actix_web::{
    http::{Method, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use paylink_common::TokenAmount;
use paylink_engine::db_types::{
    Merchant,
    OnChainProductId,
    Product,
    ProductId,
    ShareableLink,
    Transaction,
    TransactionStatus,
    TxHash,
    TxRef,
    WalletAddress,
};

use crate::{routes::route_not_found, server::json_config};

pub const MERCHANT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
pub const PAYER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const PRODUCT_TX: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
pub const PAYMENT_TX: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";
pub const ON_CHAIN_ID: &str = "0xabababababababababababababababababababababababababababababababab";
pub const FRONTEND: &str = "http://localhost:5173";

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send_request(TestRequest::get().uri(path), configure).await
}

pub async fn json_request<F>(method: Method, path: &str, body: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::default()
        .method(method)
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    send_request(req, configure).await
}

async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().app_data(json_config()).configure(configure).default_service(web::to(route_not_found));
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn address(s: &str) -> WalletAddress {
    s.parse().unwrap()
}

pub fn merchant(webhook_url: Option<&str>) -> Merchant {
    Merchant {
        id: 1,
        wallet_address: address(MERCHANT),
        webhook_url: webhook_url.map(String::from),
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn product(product_id: &str, is_active: bool) -> Product {
    Product {
        id: 1,
        product_id: product_id.parse::<ProductId>().unwrap(),
        merchant_address: address(MERCHANT),
        name: "Coffee".to_string(),
        description: "A cup of coffee".to_string(),
        image_link: "https://example.com/coffee.png".to_string(),
        price: "10.00".parse::<TokenAmount>().unwrap(),
        token_address: None,
        on_chain_product_id: ON_CHAIN_ID.parse::<OnChainProductId>().unwrap(),
        is_active,
        shareable_link: ShareableLink("abcDEF123456".to_string()),
        creation_tx_hash: PRODUCT_TX.parse::<TxHash>().unwrap(),
        creation_block_number: Some(42),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn transaction(product_id: &str) -> Transaction {
    Transaction {
        id: 1,
        tx_hash: PAYMENT_TX.parse().unwrap(),
        tx_ref: TxRef("TX-TEST-0001".to_string()),
        product_id: product_id.parse().unwrap(),
        merchant_address: address(MERCHANT),
        payer_address: address(PAYER),
        amount: "10.00".parse().unwrap(),
        token_address: None,
        status: TransactionStatus::Completed,
        block_number: Some(100),
        webhook_sent: false,
        webhook_response: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}
