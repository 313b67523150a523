//! Identity assertions
//!
//! Customers sign in with an ID token from an external OpenID Connect provider. The server never sees a password; it
//! only checks the token's signature, issuer and audience, and takes the stable `sub` claim as the customer's subject
//! identifier.
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::*;
use serde::Deserialize;

use crate::{
    config::{IdentityConfig, IdentityKey},
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject_id: String,
    pub display_name: String,
}

/// Turns an identity assertion into a verified `(subject_id, display_name)` pair, or fails with
/// [`AuthError::BadAssertion`].
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, AuthError>;
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    name: Option<String>,
    email: Option<String>,
}

pub struct OidcIdTokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl OidcIdTokenVerifier {
    pub fn new(config: &IdentityConfig) -> Result<Self, ServerError> {
        let (key, algorithm) = match &config.key {
            IdentityKey::SharedSecret(secret) => {
                (Some(DecodingKey::from_secret(secret.reveal().as_bytes())), Algorithm::HS256)
            },
            IdentityKey::PublicKeyPem(pem) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| ServerError::ConfigurationError(format!("Invalid identity provider key. {e}")))?;
                (Some(key), Algorithm::RS256)
            },
            IdentityKey::Unset => (None, Algorithm::RS256),
        };
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        match &config.client_id {
            Some(client_id) => validation.set_audience(&[client_id.as_str()]),
            None => validation.validate_aud = false,
        }
        Ok(Self { key, validation })
    }
}

impl IdentityVerifier for OidcIdTokenVerifier {
    fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, AuthError> {
        let key = self.key.as_ref().ok_or_else(|| {
            warn!("🔐️ A login was attempted, but no identity provider key has been configured");
            AuthError::BadAssertion("Identity verification is not configured".to_string())
        })?;
        let data = decode::<IdTokenClaims>(assertion, key, &self.validation).map_err(|e| {
            debug!("🔐️ ID token was rejected. {e}");
            AuthError::BadAssertion(e.to_string())
        })?;
        let IdTokenClaims { sub, name, email } = data.claims;
        if sub.trim().is_empty() {
            return Err(AuthError::BadAssertion("The ID token has an empty subject".to_string()));
        }
        let display_name = name.or(email).unwrap_or_else(|| sub.clone());
        Ok(VerifiedIdentity { subject_id: sub, display_name })
    }
}
