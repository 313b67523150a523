//! Access tokens
//!
//! After a successful login the server issues its own HS256-signed JWT. The token carries the customer id in the `sub`
//! claim, so every authenticated route can resolve the caller without touching the identity provider again.
//!
//! Handlers that need an authenticated caller simply take a [`JwtClaims`] argument. The extractor reads the
//! `Authorization: Bearer <token>` header and validates it with the [`TokenIssuer`] registered as app data.
use std::str::FromStr;

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use food_order_engine::db_types::{Customer, CustomerId};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The customer id
    pub sub: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn customer_id(&self) -> Result<CustomerId, AuthError> {
        CustomerId::from_str(&self.sub).map_err(|e| AuthError::Unauthorized(e.to_string()))
    }
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: config.access_token_lifetime,
        }
    }

    /// Issue a new access token for the given customer.
    /// This method DOES NOT check that the customer is legitimate. The identity assertion must be verified prior to
    /// calling `issue_token`.
    pub fn issue_token(&self, customer: &Customer) -> Result<String, AuthError> {
        self.issue_token_at(customer, Utc::now())
    }

    pub fn issue_token_at(&self, customer: &Customer, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = JwtClaims {
            sub: customer.id.to_string(),
            name: customer.name.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssueError(e.to_string()))
    }

    /// Checks the signature and expiry of an access token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("🔐️ Access token was rejected. {e}");
            AuthError::Unauthorized(e.to_string())
        })?;
        Ok(data.claims)
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::ConfigurationError("No access token issuer has been registered".to_string()))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::Unauthorized("No bearer token was provided".to_string()))?;
    let value = header.to_str().map_err(|e| AuthError::Unauthorized(format!("Unreadable Authorization header. {e}")))?;
    let token = bearer_token(value).ok_or_else(|| AuthError::Unauthorized("Expected a bearer token".to_string()))?;
    let claims = issuer.validate(token)?;
    Ok(claims)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
