use std::{env, fs};

use gradebook_common::{parse_boolean_flag, parse_list};
use log::*;
use rsa::{pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey, RsaPublicKey};

use crate::errors::ServerError;

const DEFAULT_GBK_HOST: &str = "127.0.0.1";
const DEFAULT_GBK_PORT: u16 = 8080;
const DEFAULT_GBK_DATABASE_URL: &str = "sqlite://data/gradebook.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, pending database migrations are applied before the server starts accepting requests.
    pub auto_migrate: bool,
    pub auth: AuthConfig,
    /// Browser origins that may call the API cross-origin.
    pub cors_origins: AllowedOrigins,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, auth: AuthConfig) -> Self {
        Self {
            host: host.to_string(),
            port,
            database_url: DEFAULT_GBK_DATABASE_URL.to_string(),
            auto_migrate: false,
            auth,
            cors_origins: AllowedOrigins::default(),
        }
    }

    /// Reads the configuration from `GBK_*` environment variables. Everything except the token verification key has
    /// a usable default. Without a verification key no request could ever be authenticated, so that is an error.
    pub fn try_from_env() -> Result<Self, ServerError> {
        let host = env::var("GBK_HOST").ok().unwrap_or_else(|| DEFAULT_GBK_HOST.into());
        let port = env::var("GBK_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for GBK_PORT. {e} Using the default, {DEFAULT_GBK_PORT}, instead."
                    );
                    DEFAULT_GBK_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GBK_PORT);
        let database_url = env::var("GBK_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ GBK_DATABASE_URL is not set. Using the default, {DEFAULT_GBK_DATABASE_URL}.");
            DEFAULT_GBK_DATABASE_URL.into()
        });
        let auto_migrate = parse_boolean_flag(env::var("GBK_AUTO_MIGRATE").ok(), false);
        let auth = AuthConfig::try_from_env()?;
        let cors_origins = AllowedOrigins::from_env_value(env::var("GBK_CORS_ORIGINS").ok());
        match &cors_origins {
            AllowedOrigins::None => {
                info!("🪛️ GBK_CORS_ORIGINS is not set. Cross-origin browser requests will not be allowed.")
            },
            AllowedOrigins::Any => warn!("🪛️ CORS is open to every origin. Set GBK_CORS_ORIGINS to restrict it."),
            AllowedOrigins::List(list) => info!("🪛️ CORS allowed origins: {}", list.join(", ")),
        }
        Ok(Self { host, port, database_url, auto_migrate, auth, cors_origins })
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The identity provider's RS256 public key. Every bearer token must carry a signature that verifies against it.
    pub jwt_verification_key: RsaPublicKey,
    /// If set, tokens must carry an `iss` claim equal to this value.
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_verification_key: RsaPublicKey, issuer: Option<String>) -> Self {
        Self { jwt_verification_key, issuer }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let key_data = match env::var("GBK_JWT_VERIFICATION_KEY") {
            Ok(s) => s,
            Err(_) => {
                let path = env::var("GBK_JWT_VERIFICATION_KEY_FILE").map_err(|_| {
                    ServerError::ConfigurationError(
                        "Neither GBK_JWT_VERIFICATION_KEY nor GBK_JWT_VERIFICATION_KEY_FILE is set.".to_string(),
                    )
                })?;
                info!("🪛️ Loading the JWT verification key from {path}");
                fs::read_to_string(&path).map_err(|e| {
                    ServerError::ConfigurationError(format!("Could not read verification key file {path}. {e}"))
                })?
            },
        };
        let jwt_verification_key = parse_verification_key(&key_data)?;
        let issuer = env::var("GBK_JWT_ISSUER").ok().filter(|s| !s.trim().is_empty());
        if issuer.is_none() {
            warn!("🪛️ GBK_JWT_ISSUER is not set. Tokens from any issuer signed with the configured key are accepted.");
        }
        Ok(Self { jwt_verification_key, issuer })
    }
}

/// Accepts an SPKI PEM (`BEGIN PUBLIC KEY`), a PKCS#1 PEM (`BEGIN RSA PUBLIC KEY`), or the bare base64 body of an
/// SPKI key, which is how identity providers usually publish it.
pub fn parse_verification_key(data: &str) -> Result<RsaPublicKey, ServerError> {
    let data = data.trim();
    if data.contains("BEGIN PUBLIC KEY") {
        RsaPublicKey::from_public_key_pem(data)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid JWT verification key. {e}")))
    } else if data.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(data)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid JWT verification key. {e}")))
    } else {
        let body = data.split_whitespace().collect::<String>();
        let der = base64::decode(body).map_err(|e| {
            ServerError::ConfigurationError(format!("JWT verification key is neither PEM nor base64. {e}"))
        })?;
        RsaPublicKey::from_public_key_der(&der)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid JWT verification key. {e}")))
    }
}

//-----------------------------------------------  AllowedOrigins  -----------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// No cross-origin requests are allowed.
    #[default]
    None,
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// `*` allows any origin, otherwise the value is a comma-separated list of origins such as
    /// `http://localhost:3000`.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") => Self::None,
            Some("*") => Self::Any,
            Some(s) => {
                let list = parse_list(s).into_iter().map(|o| o.trim_end_matches('/').to_string()).collect::<Vec<_>>();
                if list.is_empty() {
                    Self::None
                } else {
                    Self::List(list)
                }
            },
        }
    }

    pub fn permits(&self, origin: &str) -> bool {
        match self {
            Self::None => false,
            Self::Any => true,
            Self::List(list) => {
                let origin = origin.trim_end_matches('/');
                list.iter().any(|o| o.eq_ignore_ascii_case(origin))
            },
        }
    }
}
