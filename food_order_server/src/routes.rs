//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution.
use std::{fmt::Display, str::FromStr};

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use food_order_engine::{
    db_types::{Area, NewPayment, NewRestaurant, OrderId, RestaurantId, TransactionId},
    order_objects::OrderRequest,
    CustomerApi,
    CustomerManagement,
    OrderFlowApi,
    OrderManagement,
    PaymentApi,
    PaymentManagement,
    ReportManagement,
    ReportingApi,
    RestaurantApi,
    RestaurantManagement,
};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::ServerOptions,
    data_objects::{
        AccessTokenResponse,
        LoginRequest,
        MessageResponse,
        SubsetEarnings,
        TokenCheckResponse,
        TotalEarnings,
    },
    errors::ServerError,
    helpers::get_remote_ip,
    identity::IdentityVerifier,
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

fn parse_path<T>(value: String, what: &str) -> Result<T, ServerError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|e| {
        debug!("💻️ Invalid {what} in request path. {e}");
        ServerError::InvalidRequestPath(format!("Invalid {what}. {e}"))
    })
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::new("Food ordering backend"))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(login => Post "/auth/login" impl CustomerManagement);
/// Route handler for the login endpoint
///
/// The caller supplies an ID token from the identity provider in the `id_token` field of the JSON body. If the token
/// checks out, the customer for its subject is fetched, or created on their first login, and a bearer access token
/// is issued for that customer.
pub async fn login<B: CustomerManagement>(
    req: HttpRequest,
    body: web::Json<LoginRequest>,
    verifier: web::Data<dyn IdentityVerifier>,
    api: web::Data<CustomerApi<B>>,
    signer: web::Data<TokenIssuer>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let remote_ip = get_remote_ip(&req, options.use_x_forwarded_for);
    trace!("💻️ Received login request from {remote_ip:?}");
    let identity = verifier.verify(&body.id_token)?;
    let customer = api.customer_for_subject(&identity.subject_id, &identity.display_name).await?;
    let access_token = signer.issue_token(&customer)?;
    info!("💻️ Customer {} logged in from {remote_ip:?}", customer.id);
    Ok(HttpResponse::Ok().json(AccessTokenResponse::bearer(access_token)))
}

route!(verify_token => Get "/auth/verify-token" impl CustomerManagement);
/// Confirms that the bearer token is valid and that the customer it was issued to still exists.
pub async fn verify_token<B: CustomerManagement>(
    claims: JwtClaims,
    api: web::Data<CustomerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let customer_id = claims.customer_id()?;
    debug!("💻️ GET verify_token for {customer_id}");
    let customer = api.fetch_customer(&customer_id).await?;
    let response =
        TokenCheckResponse { message: "Token is valid".to_string(), user_id: customer.id, name: customer.name };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(place_order => Post "/orders" impl OrderManagement);
/// Places an order for the authenticated customer. The payment must exist and have succeeded, the restaurant must
/// exist, and a payment can only ever back one order.
pub async fn place_order<B: OrderManagement>(
    claims: JwtClaims,
    body: web::Json<OrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let customer_id = claims.customer_id()?;
    let request = body.into_inner();
    debug!("💻️ POST order for {} from {customer_id}", request.food_item);
    let order = api.place_order(request, customer_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(order_by_id => Get "/orders/{order_id}" impl OrderManagement);
/// Fetches one of the caller's orders. Orders that belong to other customers are reported as not found.
pub async fn order_by_id<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = parse_path::<OrderId>(path.into_inner(), "order id")?;
    let customer_id = claims.customer_id()?;
    debug!("💻️ GET order_by_id({order_id}) for {customer_id}");
    let order = api.fetch_order_for_customer(&order_id, &customer_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Reports  ----------------------------------------------------
route!(last_month_earnings => Get "/orders/reports/{region}/last_month" impl ReportManagement);
pub async fn last_month_earnings<B: ReportManagement>(
    path: web::Path<String>,
    api: web::Data<ReportingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let area = parse_path::<Area>(path.into_inner(), "region")?;
    debug!("💻️ GET last month's earnings for {area}");
    let total_earnings = api.earnings_last_month(area).await?;
    Ok(HttpResponse::Ok().json(TotalEarnings { total_earnings }))
}

route!(subset_earnings => Get "/orders/reports/{region}/subset_earnings" impl ReportManagement);
/// All-time earnings in a region from the vegetarian items on the menu.
pub async fn subset_earnings<B: ReportManagement>(
    path: web::Path<String>,
    api: web::Data<ReportingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let area = parse_path::<Area>(path.into_inner(), "region")?;
    debug!("💻️ GET subset earnings for {area}");
    let subset_earnings = api.subset_earnings(area).await?;
    Ok(HttpResponse::Ok().json(SubsetEarnings { subset_earnings }))
}

route!(veg_earnings => Get "/orders/reports/{region}/veg_earnings" impl ReportManagement);
pub async fn veg_earnings<B: ReportManagement>(
    path: web::Path<String>,
    api: web::Data<ReportingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    subset_earnings(path, api).await
}

route!(top_customers => Get "/orders/reports/top_customers" impl ReportManagement);
pub async fn top_customers<B: ReportManagement>(api: web::Data<ReportingApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET top customers");
    let customers = api.top_customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

route!(daily_revenue_7days => Get "/orders/reports/daily_revenue_7days" impl ReportManagement);
pub async fn daily_revenue_7days<B: ReportManagement>(
    api: web::Data<ReportingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET daily revenue for the last 7 days");
    let rows = api.daily_revenue_7days().await?;
    Ok(HttpResponse::Ok().json(rows))
}

route!(restaurant_summary => Get "/orders/reports/restaurant/{restaurant_id}/summary" impl ReportManagement);
/// How many of each item a restaurant has sold against successful payments. An unknown restaurant has an empty
/// summary.
pub async fn restaurant_summary<B: ReportManagement>(
    path: web::Path<String>,
    api: web::Data<ReportingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let restaurant_id = parse_path::<RestaurantId>(path.into_inner(), "restaurant id")?;
    debug!("💻️ GET summary for restaurant {restaurant_id}");
    let summary = api.restaurant_summary(&restaurant_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/payments" impl PaymentManagement);
pub async fn create_payment<B: PaymentManagement>(
    body: web::Json<NewPayment>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payment = body.into_inner();
    debug!("💻️ POST payment ({} via {})", payment.status, payment.payment_type);
    let payment = api.record_payment(payment).await?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(payment_by_id => Get "/payments/{transaction_id}" impl PaymentManagement);
pub async fn payment_by_id<B: PaymentManagement>(
    path: web::Path<String>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let transaction_id = parse_path::<TransactionId>(path.into_inner(), "transaction id")?;
    debug!("💻️ GET payment {transaction_id}");
    let payment = api.fetch_payment(&transaction_id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

//----------------------------------------------   Restaurants  ----------------------------------------------------
route!(create_restaurant => Post "/restaurants" impl RestaurantManagement);
pub async fn create_restaurant<B: RestaurantManagement>(
    body: web::Json<NewRestaurant>,
    api: web::Data<RestaurantApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let restaurant = body.into_inner();
    debug!("💻️ POST restaurant {} in {}", restaurant.restaurant_name, restaurant.area);
    let restaurant = api.create_restaurant(restaurant).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

route!(restaurant_by_id => Get "/restaurants/{restaurant_id}" impl RestaurantManagement);
pub async fn restaurant_by_id<B: RestaurantManagement>(
    path: web::Path<String>,
    api: web::Data<RestaurantApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let restaurant_id = parse_path::<RestaurantId>(path.into_inner(), "restaurant id")?;
    debug!("💻️ GET restaurant {restaurant_id}");
    let restaurant = api.fetch_restaurant(&restaurant_id).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}
