use std::sync::Arc;

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use food_order_engine::{db_types::NewCustomer, CustomerApi};

use super::helpers::{customer, expired_token, get_auth_config, get_request, issue_token, post_request};
use crate::{
    auth::TokenIssuer,
    config::ServerOptions,
    data_objects::{AccessTokenResponse, TokenCheckResponse},
    endpoint_tests::mocks::{MockCustomerManager, MockVerifier},
    errors::AuthError,
    identity::{IdentityVerifier, VerifiedIdentity},
    routes::{LoginRoute, VerifyTokenRoute},
};

fn configure(cfg: &mut ServiceConfig, customers: MockCustomerManager, verifier: MockVerifier) {
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(verifier);
    cfg.app_data(web::Data::new(CustomerApi::new(customers)))
        .app_data(web::Data::from(verifier))
        .app_data(web::Data::new(ServerOptions::default()))
        .service(LoginRoute::<MockCustomerManager>::new())
        .service(VerifyTokenRoute::<MockCustomerManager>::new());
}

fn good_verifier() -> MockVerifier {
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().withf(|token| token == "good-id-token").returning(|_| {
        Ok(VerifiedIdentity { subject_id: "idp-subject-1".to_string(), display_name: "Asha".to_string() })
    });
    verifier
}

#[actix_web::test]
async fn login_issues_an_access_token() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers
        .expect_fetch_or_create_customer()
        .withf(|c: &NewCustomer| c.subject_id == "idp-subject-1" && c.name == "Asha")
        .times(1)
        .returning(|_| Ok(customer()));
    let (status, body) =
        post_request("", "/auth/login", r#"{"id_token": "good-id-token"}"#, |cfg| {
            configure(cfg, customers, good_verifier())
        })
        .await;
    assert_eq!(status, StatusCode::OK);
    let response: AccessTokenResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.token_type, "bearer");
    let claims = TokenIssuer::new(&get_auth_config()).validate(&response.access_token).unwrap();
    assert_eq!(claims.customer_id().unwrap(), customer().id);
    assert_eq!(claims.name, "Asha");
}

#[actix_web::test]
async fn login_with_a_bad_assertion() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_or_create_customer().never();
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().returning(|_| Err(AuthError::BadAssertion("InvalidSignature".to_string())));
    let (status, body) = post_request("", "/auth/login", r#"{"id_token": "forged"}"#, |cfg| {
        configure(cfg, customers, verifier)
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        r#"{"error":"Authentication Error. The identity assertion could not be verified. InvalidSignature"}"#
    );
}

#[actix_web::test]
async fn login_without_a_token() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_or_create_customer().never();
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().never();
    let (status, body) =
        post_request("", "/auth/login", r#"{"token": "x"}"#, |cfg| configure(cfg, customers, verifier)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body"#), "{body}");
}

#[actix_web::test]
async fn verify_a_valid_token() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_customer().withf(|id| id == &customer().id).returning(|_| Ok(Some(customer())));
    let token = issue_token(&customer());
    let (status, body) =
        get_request(&token, "/auth/verify-token", |cfg| configure(cfg, customers, MockVerifier::new())).await;
    assert_eq!(status, StatusCode::OK);
    let response: TokenCheckResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response, TokenCheckResponse {
        message: "Token is valid".to_string(),
        user_id: customer().id,
        name: "Asha".to_string()
    });
}

#[actix_web::test]
async fn verify_token_for_a_deleted_customer() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_customer().returning(|_| Ok(None));
    let token = issue_token(&customer());
    let (status, _) =
        get_request(&token, "/auth/verify-token", |cfg| configure(cfg, customers, MockVerifier::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn verify_token_without_credentials() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_customer().never();
    let (status, body) =
        get_request("", "/auth/verify-token", |cfg| configure(cfg, customers, MockVerifier::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. Not authorized. No bearer token was provided"}"#);
}

#[actix_web::test]
async fn verify_an_expired_token() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_customer().never();
    let token = expired_token(&customer());
    let (status, _) =
        get_request(&token, "/auth/verify-token", |cfg| configure(cfg, customers, MockVerifier::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn verify_a_tampered_token() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomerManager::new();
    customers.expect_fetch_customer().never();
    let mut token = issue_token(&customer());
    token.replace_range(token.len() - 10..token.len() - 5, "AAAAA");
    let (status, _) =
        get_request(&token, "/auth/verify-token", |cfg| configure(cfg, customers, MockVerifier::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
