use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    middleware::NormalizePath,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{Duration, Utc};
use food_order_engine::db_types::{Customer, CustomerId};
use log::debug;

use crate::{auth::TokenIssuer, config::AuthConfig, server::json_config};

// The key used to sign access tokens in tests. DO NOT re-use it anywhere.
const TEST_JWT_SECRET: &str = "endpoint-tests-only-3e5b0c1d9f2a";

pub const CUSTOMER_ID: &str = "6f1c1f0e-3c2b-4f4e-9d0a-1b2c3d4e5f60";

pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_JWT_SECRET, Duration::hours(1))
}

pub fn customer() -> Customer {
    Customer {
        id: CUSTOMER_ID.parse::<CustomerId>().unwrap(),
        name: "Asha".to_string(),
        subject_id: "idp-subject-1".to_string(),
        age: None,
    }
}

pub fn issue_token(customer: &Customer) -> String {
    TokenIssuer::new(&get_auth_config()).issue_token(customer).unwrap()
}

pub fn expired_token(customer: &Customer) -> String {
    TokenIssuer::new(&get_auth_config()).issue_token_at(customer, Utc::now() - Duration::days(2)).unwrap()
}

pub async fn get_request<F>(token: &str, path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send(TestRequest::get().uri(path), token, configure).await
}

pub async fn post_request<F>(token: &str, path: &str, body: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    send(req, token, configure).await
}

async fn send<F>(mut req: TestRequest, token: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    if !token.is_empty() {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    let app = App::new()
        .wrap(NormalizePath::trim())
        .app_data(json_config())
        .app_data(web::Data::new(TokenIssuer::new(&get_auth_config())))
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
