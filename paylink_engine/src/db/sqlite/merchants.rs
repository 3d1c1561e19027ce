use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Merchant, NewMerchant, WalletAddress};

pub async fn insert_merchant(merchant: NewMerchant, conn: &mut SqliteConnection) -> Result<Merchant, sqlx::Error> {
    let now = Utc::now();
    let merchant: Merchant = sqlx::query_as(
        r#"
            INSERT INTO merchants (wallet_address, webhook_url, is_active, created_at, updated_at)
            VALUES ($1, $2, 1, $3, $3)
            RETURNING *;
        "#,
    )
    .bind(merchant.wallet_address.as_str())
    .bind(merchant.webhook_url)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Merchant [{}] inserted with id {}", merchant.wallet_address, merchant.id);
    Ok(merchant)
}

pub async fn fetch_merchant_by_address(
    address: &WalletAddress,
    conn: &mut SqliteConnection,
) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant = sqlx::query_as("SELECT * FROM merchants WHERE wallet_address = $1")
        .bind(address.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(merchant)
}

/// Sets (or clears) the webhook URL. Returns `None` if no merchant has the given address.
pub async fn update_webhook_url(
    address: &WalletAddress,
    webhook_url: Option<String>,
    conn: &mut SqliteConnection,
) -> Result<Option<Merchant>, sqlx::Error> {
    let merchant = sqlx::query_as(
        r#"
            UPDATE merchants SET webhook_url = $1, updated_at = $2
            WHERE wallet_address = $3
            RETURNING *;
        "#,
    )
    .bind(webhook_url)
    .bind(Utc::now())
    .bind(address.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(merchant)
}
