use std::{path::Path, sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{dev::Server, error::JsonPayloadError, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use paylink_engine::{
    chain::EthersChainReader,
    traits::{ChainReader, WebhookSender},
    webhook::WebhookClient,
    MerchantApi,
    PaymentFlowApi,
    ProductApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    data_objects::ChainStatus,
    errors::ServerError,
    routes::{
        health,
        route_not_found,
        CreateProductRoute,
        MerchantRoute,
        OnboardMerchantRoute,
        ProductByLinkRoute,
        ProductsForMerchantRoute,
        RecordTransactionRoute,
        TransactionByHashRoute,
        TransactionsForMerchantRoute,
        UpdateProductRoute,
        UpdateWebhookRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    ensure_database_directory(&config.database_url)?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Database migrations failed. {e}")))?;
    let (chain, chain_status) = connect_chain_reader(&config).await;
    let webhooks = WebhookClient::new(config.webhook_timeout, config.webhook_signing_secret.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db, chain, Arc::new(webhooks), chain_status)?;
    srv.await.map_err(ServerError::from)
}

/// Connects to the payment contract. The server runs without on-chain verification if this fails.
async fn connect_chain_reader(config: &ServerConfig) -> (Option<Arc<dyn ChainReader>>, ChainStatus) {
    let Some(address) = config.contract_address.as_deref() else {
        return (None, ChainStatus::default());
    };
    match EthersChainReader::connect(&config.rpc_url, address).await {
        Ok(reader) => {
            let contract_address = Some(reader.contract_address().to_string());
            let status = ChainStatus { contract_initialized: true, contract_address };
            let reader: Arc<dyn ChainReader> = Arc::new(reader);
            (Some(reader), status)
        },
        Err(e) => {
            warn!("⛓️ Could not connect to the payment contract. On-chain verification is disabled. {e}");
            (None, ChainStatus { contract_initialized: false, contract_address: Some(address.to_string()) })
        },
    }
}

/// SQLite creates the database file on demand, but not the directory it lives in.
fn ensure_database_directory(url: &str) -> Result<(), ServerError> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            info!("🗃️ Creating database directory {}", dir.display());
            std::fs::create_dir_all(dir).map_err(|e| ServerError::InitializeError(e.to_string()))
        },
        _ => Ok(()),
    }
}

/// Turns malformed JSON bodies into `400 Bad Request` responses with the standard error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    chain: Option<Arc<dyn ChainReader>>,
    webhooks: Arc<dyn WebhookSender>,
    chain_status: ChainStatus,
) -> Result<Server, ServerError> {
    let chain_status = web::Data::new(chain_status);
    let srv = HttpServer::new(move || {
        let merchant_api = MerchantApi::new(db.clone(), config.require_onboarding_signature);
        let product_api = ProductApi::new(db.clone(), chain.clone(), &config.frontend_url);
        let payment_api = PaymentFlowApi::new(db.clone(), webhooks.clone());
        let api_scope = web::scope("/api")
            .service(OnboardMerchantRoute::<SqliteDatabase>::new())
            .service(MerchantRoute::<SqliteDatabase>::new())
            .service(UpdateWebhookRoute::<SqliteDatabase>::new())
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(ProductsForMerchantRoute::<SqliteDatabase>::new())
            .service(ProductByLinkRoute::<SqliteDatabase>::new())
            .service(UpdateProductRoute::<SqliteDatabase>::new())
            .service(RecordTransactionRoute::<SqliteDatabase>::new())
            .service(TransactionsForMerchantRoute::<SqliteDatabase>::new())
            .service(TransactionByHashRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("paylink::access_log"))
            .wrap(Cors::permissive())
            .app_data(json_config())
            .app_data(web::Data::new(merchant_api))
            .app_data(web::Data::new(product_api))
            .app_data(web::Data::new(payment_api))
            .app_data(chain_status.clone())
            .service(health)
            .service(api_scope)
            .default_service(web::to(route_not_found))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
