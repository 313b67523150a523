use std::{sync::Arc, time::Duration};

use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{Logger, NormalizePath},
    web,
    App,
    HttpServer,
};
use food_order_engine::{CustomerApi, OrderFlowApi, PaymentApi, ReportingApi, RestaurantApi, SqliteDatabase};
use log::*;

use crate::{
    auth::TokenIssuer,
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    identity::{IdentityVerifier, OidcIdTokenVerifier},
    routes::{
        health,
        root,
        CreatePaymentRoute,
        CreateRestaurantRoute,
        DailyRevenue7daysRoute,
        LastMonthEarningsRoute,
        LoginRoute,
        OrderByIdRoute,
        PaymentByIdRoute,
        PlaceOrderRoute,
        RestaurantByIdRoute,
        RestaurantSummaryRoute,
        SubsetEarningsRoute,
        TopCustomersRoute,
        VegEarningsRoute,
        VerifyTokenRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        info!("🚀️ Database migrations are up to date");
    }
    let verifier = OidcIdTokenVerifier::new(&config.identity)?;
    let srv = create_server_instance(config, db, Arc::new(verifier))?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    verifier: Arc<dyn IdentityVerifier>,
) -> Result<Server, ServerError> {
    let (host, port) = (config.host.clone(), config.port);
    let access_log_format =
        if config.use_x_forwarded_for { "%t (%D ms) %s %{r}a %{Host}i %U" } else { "%t (%D ms) %s %a %{Host}i %U" };
    let srv = HttpServer::new(move || {
        let options = ServerOptions::from_config(&config);
        let customer_api = CustomerApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone());
        let payments_api = PaymentApi::new(db.clone());
        let restaurants_api = RestaurantApi::new(db.clone());
        let reporting_api =
            ReportingApi::new(db.clone(), config.prices.clone()).with_top_customers_limit(config.top_customers_limit);
        let jwt_signer = TokenIssuer::new(&config.auth);
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::new(access_log_format).log_target("fos::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(options))
            .app_data(web::Data::new(customer_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(restaurants_api))
            .app_data(web::Data::new(reporting_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::from(verifier.clone()))
            .service(health)
            .service(root)
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(VerifyTokenRoute::<SqliteDatabase>::new())
            .service(PlaceOrderRoute::<SqliteDatabase>::new())
            .service(LastMonthEarningsRoute::<SqliteDatabase>::new())
            .service(SubsetEarningsRoute::<SqliteDatabase>::new())
            .service(VegEarningsRoute::<SqliteDatabase>::new())
            .service(TopCustomersRoute::<SqliteDatabase>::new())
            .service(DailyRevenue7daysRoute::<SqliteDatabase>::new())
            .service(RestaurantSummaryRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(CreatePaymentRoute::<SqliteDatabase>::new())
            .service(PaymentByIdRoute::<SqliteDatabase>::new())
            .service(CreateRestaurantRoute::<SqliteDatabase>::new())
            .service(RestaurantByIdRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies are reported with the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not read request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
