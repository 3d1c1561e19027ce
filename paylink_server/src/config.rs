//! Server configuration
//!
//! The server is configured entirely through environment variables. A `.env` file in the working directory is loaded
//! first, if present. Missing or invalid values fall back to defaults suited to local development, with a log message.
use std::{env, time::Duration};

use log::*;
use paylink_common::{helpers::parse_boolean_flag, Secret};

const DEFAULT_PAYLINK_HOST: &str = "127.0.0.1";
const DEFAULT_PAYLINK_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/paylink.db";
const DEFAULT_RPC_URL: &str = "https://testnet-rpc.monad.xyz";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// JSON-RPC endpoint used to verify product creation transactions.
    pub rpc_url: String,
    /// The deployed payment contract. If absent, on-chain verification is disabled.
    pub contract_address: Option<String>,
    /// Base URL of the payment frontend. Shareable links are expanded to `<frontend_url>/pay/<token>`.
    pub frontend_url: String,
    pub webhook_timeout: Duration,
    /// When set, each webhook carries an HMAC-SHA256 signature of its body.
    pub webhook_signing_secret: Option<Secret<String>>,
    /// If true, merchants must sign an ownership proof when onboarding.
    pub require_onboarding_signature: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PAYLINK_HOST.to_string(),
            port: DEFAULT_PAYLINK_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            webhook_timeout: DEFAULT_WEBHOOK_TIMEOUT,
            webhook_signing_secret: None,
            require_onboarding_signature: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PAYLINK_HOST").ok().unwrap_or_else(|| DEFAULT_PAYLINK_HOST.into());
        let port = env::var("PAYLINK_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PAYLINK_PORT. {e} Using the default, {DEFAULT_PAYLINK_PORT}, \
                         instead."
                    );
                    DEFAULT_PAYLINK_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PAYLINK_PORT);
        let database_url = env::var("PAYLINK_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PAYLINK_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.into()
        });
        let rpc_url = env::var("PAYLINK_RPC_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PAYLINK_RPC_URL is not set. Using the default, {DEFAULT_RPC_URL}.");
            DEFAULT_RPC_URL.into()
        });
        let contract_address = env::var("PAYLINK_CONTRACT_ADDRESS").ok().filter(|s| !s.trim().is_empty());
        if contract_address.is_none() {
            warn!(
                "🪛️ PAYLINK_CONTRACT_ADDRESS is not set. Product creation transactions will not be verified on-chain."
            );
        }
        let frontend_url = env::var("PAYLINK_FRONTEND_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PAYLINK_FRONTEND_URL is not set. Using the default, {DEFAULT_FRONTEND_URL}.");
            DEFAULT_FRONTEND_URL.into()
        });
        let webhook_timeout = env::var("PAYLINK_WEBHOOK_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        warn!("🪛️ Invalid PAYLINK_WEBHOOK_TIMEOUT ({s}). {e}. Using the default.");
                    })
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_WEBHOOK_TIMEOUT);
        let webhook_signing_secret =
            env::var("PAYLINK_WEBHOOK_SIGNING_SECRET").ok().filter(|s| !s.is_empty()).map(Secret::new);
        if webhook_signing_secret.is_none() {
            info!("🪛️ PAYLINK_WEBHOOK_SIGNING_SECRET is not set. Webhooks will be sent unsigned.");
        }
        let require_onboarding_signature =
            parse_boolean_flag(env::var("PAYLINK_REQUIRE_ONBOARDING_SIGNATURE").ok(), false);
        Self {
            host,
            port,
            database_url,
            rpc_url,
            contract_address,
            frontend_url,
            webhook_timeout,
            webhook_signing_secret,
            require_onboarding_signature,
        }
    }
}
