//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Database calls, chain lookups and webhook deliveries are all
//! expressed as futures, so a worker keeps serving other requests while a merchant's webhook endpoint is slow to
//! answer.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use paylink_engine::{
    request_objects::{
        CreateProductRequest,
        OnboardMerchantRequest,
        RecordTransactionRequest,
        UpdateProductRequest,
        UpdateWebhookRequest,
    },
    traits::{MerchantManagement, ProductManagement, TransactionManagement},
    MerchantApi,
    PaymentFlowApi,
    ProductApi,
};
use serde_json::json;

use crate::{
    data_objects::{
        ChainStatus,
        HealthResponse,
        OnboardResponse,
        ProductCreatedResponse,
        ProductUpdatedResponse,
        TransactionRecordedResponse,
        WebhookUpdateResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health(chain: web::Data<ChainStatus>) -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(HealthResponse::ok(&chain))
}

/// Fallback for any request that no route matched.
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    debug!("💻️ No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(json!({ "error": "Route not found", "path": req.path() }))
}

//----------------------------------------------   Merchants  ----------------------------------------------------
route!(onboard_merchant => Post "/merchants/onboard" impl MerchantManagement);
/// Route handler for merchant onboarding.
///
/// Onboarding is idempotent. A new merchant gets a `201 Created`; onboarding a known wallet again returns `200 OK`
/// with the existing record (and applies the webhook URL, if one is given).
pub async fn onboard_merchant<B: MerchantManagement>(
    body: web::Json<OnboardMerchantRequest>,
    api: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST onboard merchant {:?}", request.wallet_address);
    let outcome = api.onboard(request).await?;
    let (mut response, message) = if outcome.created {
        (HttpResponse::Created(), "Merchant onboarded successfully")
    } else {
        (HttpResponse::Ok(), "Merchant already exists")
    };
    Ok(response.json(OnboardResponse { message: message.to_string(), merchant: outcome.merchant }))
}

route!(merchant => Get "/merchants/{wallet_address}" impl MerchantManagement);
pub async fn merchant<B: MerchantManagement>(
    path: web::Path<String>,
    api: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address = path.into_inner();
    debug!("💻️ GET merchant {address}");
    let merchant = api.merchant(&address).await?;
    Ok(HttpResponse::Ok().json(merchant))
}

route!(update_webhook => Put "/merchants/{wallet_address}/webhook" impl MerchantManagement);
pub async fn update_webhook<B: MerchantManagement>(
    path: web::Path<String>,
    body: web::Json<UpdateWebhookRequest>,
    api: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address = path.into_inner();
    debug!("💻️ PUT webhook for merchant {address}");
    let webhook_url = api.update_webhook(&address, body.into_inner()).await?;
    let response = WebhookUpdateResponse { message: "Webhook URL updated successfully".to_string(), webhook_url };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(create_product => Post "/products/create" impl ProductManagement);
/// Route handler for storing a new product.
///
/// The merchant registers the product on the payment contract first, from their own wallet, and then calls this
/// endpoint with the resulting transaction hash.
pub async fn create_product<B: ProductManagement>(
    body: web::Json<CreateProductRequest>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST create product {:?} for {:?}", request.product_id, request.merchant_address);
    let product = api.create_product(request).await?;
    let response = ProductCreatedResponse { message: "Product created successfully".to_string(), product };
    Ok(HttpResponse::Created().json(response))
}

route!(products_for_merchant => Get "/products/merchant/{wallet_address}" impl ProductManagement);
pub async fn products_for_merchant<B: ProductManagement>(
    path: web::Path<String>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address = path.into_inner();
    debug!("💻️ GET products for merchant {address}");
    let products = api.products_for_merchant(&address).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(product_by_link => Get "/products/link/{shareable_link}" impl ProductManagement);
pub async fn product_by_link<B: ProductManagement>(
    path: web::Path<String>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let link = path.into_inner();
    debug!("💻️ GET product by link {link}");
    let product = api.product_by_link(&link).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(update_product => Put "/products/{product_id}" impl ProductManagement);
pub async fn update_product<B: ProductManagement>(
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ PUT product {product_id}");
    let product = api.update_product(&product_id, body.into_inner()).await?;
    let response = ProductUpdatedResponse { message: "Product updated successfully".to_string(), product };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Transactions  ----------------------------------------------------
route!(record_transaction => Post "/transactions/create" impl TransactionManagement);
/// Route handler for recording a payment.
///
/// The merchant's webhook, if any, is called before this handler returns. Webhook failures are stored on the
/// transaction record and never fail the request.
pub async fn record_transaction<B: TransactionManagement>(
    body: web::Json<RecordTransactionRequest>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST record transaction {:?} for product {:?}", request.tx_hash, request.product_id);
    let transaction = api.record_transaction(request).await?;
    let response =
        TransactionRecordedResponse { message: "Transaction recorded successfully".to_string(), transaction };
    Ok(HttpResponse::Created().json(response))
}

route!(transactions_for_merchant => Get "/transactions/merchant/{wallet_address}" impl TransactionManagement);
pub async fn transactions_for_merchant<B: TransactionManagement>(
    path: web::Path<String>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address = path.into_inner();
    debug!("💻️ GET transactions for merchant {address}");
    let transactions = api.transactions_for_merchant(&address).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

route!(transaction_by_hash => Get "/transactions/{tx_hash}" impl TransactionManagement);
pub async fn transaction_by_hash<B: TransactionManagement>(
    path: web::Path<String>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let tx_hash = path.into_inner();
    debug!("💻️ GET transaction {tx_hash}");
    let transaction = api.transaction_by_hash(&tx_hash).await?;
    Ok(HttpResponse::Ok().json(transaction))
}
