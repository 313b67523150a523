use std::env;

use chrono::Duration;
use food_order_engine::{db_types::FoodItem, PriceCatalog};
use fos_common::{parse_boolean_flag, Rupees, Secret};
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::ServerError;

const DEFAULT_FOS_HOST: &str = "127.0.0.1";
const DEFAULT_FOS_PORT: u16 = 8380;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/food_orders.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::hours(168);
const DEFAULT_IDP_ISSUER: &str = "https://accounts.google.com";
const DEFAULT_TOP_CUSTOMERS_LIMIT: u32 = 3;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// If true, the embedded database migrations are run when the server starts.
    pub auto_migrate: bool,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    /// The catalog used to value orders in reports.
    pub prices: PriceCatalog,
    pub top_customers_limit: u32,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FOS_HOST.to_string(),
            port: DEFAULT_FOS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            auto_migrate: true,
            auth: AuthConfig::default(),
            identity: IdentityConfig::default(),
            prices: PriceCatalog::standard(),
            top_customers_limit: DEFAULT_TOP_CUSTOMERS_LIMIT,
            use_x_forwarded_for: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("FOS_HOST").ok().unwrap_or_else(|| DEFAULT_FOS_HOST.into());
        let port = env::var("FOS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for FOS_PORT. {e} Using the default, {DEFAULT_FOS_PORT}.");
                    DEFAULT_FOS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FOS_PORT);
        let database_url = env::var("FOS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ FOS_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = parse_number("FOS_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let auto_migrate = parse_boolean_flag(env::var("FOS_AUTO_MIGRATE").ok(), true);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting \
                 to the default configuration."
            );
            AuthConfig::default()
        });
        let identity = IdentityConfig::from_env_or_default();
        let prices = configure_prices();
        let top_customers_limit = parse_number("FOS_TOP_CUSTOMERS_LIMIT", DEFAULT_TOP_CUSTOMERS_LIMIT);
        let use_x_forwarded_for = parse_boolean_flag(env::var("FOS_USE_X_FORWARDED_FOR").ok(), false);
        Self {
            host,
            port,
            database_url,
            max_connections,
            auto_migrate,
            auth,
            identity,
            prices,
            top_customers_limit,
            use_x_forwarded_for,
        }
    }
}

fn parse_number(var: &str, default: u32) -> u32 {
    env::var(var)
        .map_err(|_| info!("🪛️ {var} is not set. Using the default value of {default}."))
        .and_then(|s| {
            s.parse::<u32>().map_err(|e| warn!("🪛️ Invalid configuration value for {var}. {e}. Using {default}."))
        })
        .ok()
        .unwrap_or(default)
}

fn configure_prices() -> PriceCatalog {
    let standard = PriceCatalog::standard();
    let overrides = match env::var("FOS_PRICE_OVERRIDES") {
        Ok(s) => s,
        Err(_) => return standard,
    };
    parse_price_overrides(&overrides)
        .and_then(|overrides| standard.with_overrides(overrides).map_err(ServerError::from))
        .map(|catalog| {
            let prices = catalog.iter().map(|(item, price)| format!("{item}={price}")).collect::<Vec<_>>().join(", ");
            info!("🪛️ Using catalog prices: {prices}");
            catalog
        })
        .unwrap_or_else(|e| {
            error!("🪛️ Ignoring FOS_PRICE_OVERRIDES. {e}. The standard prices will be used.");
            PriceCatalog::standard()
        })
}

/// Parses a list of price overrides in the form `item=price,item=price`.
pub fn parse_price_overrides(s: &str) -> Result<Vec<(FoodItem, Rupees)>, ServerError> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (item, price) = entry
                .split_once('=')
                .ok_or_else(|| ServerError::ConfigurationError(format!("'{entry}' is not of the form item=price")))?;
            let item = item.trim().parse::<FoodItem>().map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
            let price = price
                .trim()
                .parse::<i64>()
                .map_err(|e| ServerError::ConfigurationError(format!("Invalid price for {item}. {e}")))?;
            Ok((item, Rupees::from(price)))
        })
        .collect()
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 key used to sign and verify the access tokens this server issues.
    pub jwt_secret: Secret<String>,
    pub access_token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing key has not been set. I'm using a random value for this session. DO NOT \
             operate on production like this, since every access token will be invalidated when the server \
             restarts. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect::<String>();
        Self { jwt_secret: Secret::new(secret), access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME }
    }
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S, access_token_lifetime: Duration) -> Self {
        Self { jwt_secret: Secret::new(secret.into()), access_token_lifetime }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = env::var("FOS_JWT_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [FOS_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("FOS_JWT_SECRET is empty".to_string()));
        }
        let access_token_lifetime = env::var("FOS_ACCESS_TOKEN_LIFETIME")
            .map_err(|_| {
                info!(
                    "🪛️ FOS_ACCESS_TOKEN_LIFETIME is not set. Using the default value of {} hrs.",
                    DEFAULT_ACCESS_TOKEN_LIFETIME.num_hours()
                )
            })
            .and_then(|s| {
                s.parse::<i64>()
                    .map(Duration::hours)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for FOS_ACCESS_TOKEN_LIFETIME. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME);
        Ok(Self::new(secret, access_token_lifetime))
    }
}

//-----------------------------------------------  IdentityConfig  -----------------------------------------------------
/// The key used to check the signature of identity-provider ID tokens.
#[derive(Clone, Debug, Default)]
pub enum IdentityKey {
    /// HS256 shared secret
    SharedSecret(Secret<String>),
    /// RS256 public key in PEM format
    PublicKeyPem(String),
    #[default]
    Unset,
}

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    /// The expected `iss` claim of ID tokens.
    pub issuer: String,
    /// The expected `aud` claim of ID tokens. The audience is not checked if this is not set.
    pub client_id: Option<String>,
    pub key: IdentityKey,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self { issuer: DEFAULT_IDP_ISSUER.to_string(), client_id: None, key: IdentityKey::Unset }
    }
}

impl IdentityConfig {
    pub fn from_env_or_default() -> Self {
        let issuer = env::var("FOS_IDP_ISSUER").ok().unwrap_or_else(|| DEFAULT_IDP_ISSUER.to_string());
        let client_id = env::var("FOS_IDP_CLIENT_ID").ok().filter(|s| !s.trim().is_empty());
        if client_id.is_none() {
            warn!("🪛️ FOS_IDP_CLIENT_ID is not set. The audience of ID tokens will not be checked.");
        }
        let key = match (env::var("FOS_IDP_PUBLIC_KEY_PEM"), env::var("FOS_IDP_SHARED_SECRET")) {
            (Ok(pem), _) => IdentityKey::PublicKeyPem(pem),
            (Err(_), Ok(secret)) => IdentityKey::SharedSecret(Secret::new(secret)),
            _ => {
                error!("🪛️ Neither FOS_IDP_PUBLIC_KEY_PEM nor FOS_IDP_SHARED_SECRET is set. Nobody can log in.");
                IdentityKey::Unset
            },
        };
        info!("🪛️ Accepting ID tokens issued by {issuer}");
        Self { issuer, client_id, key }
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for }
    }
}
