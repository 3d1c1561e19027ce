use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewTransaction, Transaction, TxHash, WalletAddress};

pub async fn insert_transaction(
    transaction: NewTransaction,
    conn: &mut SqliteConnection,
) -> Result<Transaction, sqlx::Error> {
    let now = Utc::now();
    let transaction: Transaction = sqlx::query_as(
        r#"
            INSERT INTO transactions (
                tx_hash,
                tx_ref,
                product_id,
                merchant_address,
                payer_address,
                amount,
                token_address,
                status,
                block_number,
                webhook_sent,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $10)
            RETURNING *;
        "#,
    )
    .bind(transaction.tx_hash.as_str())
    .bind(transaction.tx_ref.as_str())
    .bind(transaction.product_id.as_str())
    .bind(transaction.merchant_address.as_str())
    .bind(transaction.payer_address.as_str())
    .bind(transaction.amount.as_str())
    .bind(transaction.token_address.as_ref().map(|a| a.as_str()))
    .bind(transaction.status.to_string())
    .bind(transaction.block_number)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Transaction [{}] inserted with id {}", transaction.tx_hash, transaction.id);
    Ok(transaction)
}

pub async fn fetch_transaction_by_hash(
    tx_hash: &TxHash,
    conn: &mut SqliteConnection,
) -> Result<Option<Transaction>, sqlx::Error> {
    let transaction = sqlx::query_as("SELECT * FROM transactions WHERE tx_hash = $1")
        .bind(tx_hash.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(transaction)
}

pub async fn fetch_transactions_for_merchant(
    address: &WalletAddress,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Transaction>, sqlx::Error> {
    let transactions = sqlx::query_as(
        r#"
            SELECT * FROM transactions
            WHERE merchant_address = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
        "#,
    )
    .bind(address.as_str())
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(transactions)
}

/// Stores the webhook outcome. Returns `RowNotFound` if the transaction does not exist.
pub async fn update_webhook_outcome(
    tx_hash: &TxHash,
    sent: bool,
    response: Option<String>,
    conn: &mut SqliteConnection,
) -> Result<Transaction, sqlx::Error> {
    let transaction = sqlx::query_as(
        r#"
            UPDATE transactions SET webhook_sent = $1, webhook_response = $2, updated_at = $3
            WHERE tx_hash = $4
            RETURNING *;
        "#,
    )
    .bind(sent)
    .bind(response)
    .bind(Utc::now())
    .bind(tx_hash.as_str())
    .fetch_one(conn)
    .await?;
    Ok(transaction)
}
