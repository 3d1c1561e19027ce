use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::db_types::{NewProduct, Product, ProductId, ProductUpdate, ShareableLink, WalletAddress};

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, sqlx::Error> {
    let now = Utc::now();
    let product: Product = sqlx::query_as(
        r#"
            INSERT INTO products (
                product_id,
                merchant_address,
                name,
                description,
                image_link,
                price,
                token_address,
                on_chain_product_id,
                is_active,
                shareable_link,
                creation_tx_hash,
                creation_block_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, $9, $10, $11, $12, $12)
            RETURNING *;
        "#,
    )
    .bind(product.product_id.as_str())
    .bind(product.merchant_address.as_str())
    .bind(product.name)
    .bind(product.description)
    .bind(product.image_link)
    .bind(product.price.as_str())
    .bind(product.token_address.as_ref().map(|a| a.as_str()))
    .bind(product.on_chain_product_id.as_str())
    .bind(product.shareable_link.as_str())
    .bind(product.creation_tx_hash.as_str())
    .bind(product.creation_block_number)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Product [{}] inserted with id {}", product.product_id, product.id);
    Ok(product)
}

pub async fn fetch_product_by_product_id(
    product_id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as("SELECT * FROM products WHERE product_id = $1")
        .bind(product_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

pub async fn fetch_product_by_shareable_link(
    link: &ShareableLink,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as("SELECT * FROM products WHERE shareable_link = $1")
        .bind(link.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

pub async fn fetch_products_for_merchant(
    address: &WalletAddress,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    let products = sqlx::query_as(
        "SELECT * FROM products WHERE merchant_address = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(address.as_str())
    .fetch_all(conn)
    .await?;
    Ok(products)
}

/// Applies the non-empty fields of `update` to the stored product. An empty update just fetches the current record.
pub async fn update_product(
    product_id: &ProductId,
    update: ProductUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, sqlx::Error> {
    if update.is_empty() {
        trace!("🗃️ Empty update for product [{product_id}]. Nothing to change.");
        return fetch_product_by_product_id(product_id, conn).await;
    }
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE products SET updated_at = ");
    builder.push_bind(Utc::now());
    if let Some(price) = update.price {
        builder.push(", price = ");
        builder.push_bind(price.as_str().to_string());
    }
    if let Some(is_active) = update.is_active {
        builder.push(", is_active = ");
        builder.push_bind(is_active);
    }
    builder.push(" WHERE product_id = ");
    builder.push_bind(product_id.as_str());
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let product = builder.build_query_as::<Product>().fetch_optional(conn).await?;
    Ok(product)
}
