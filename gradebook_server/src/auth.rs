//! Bearer token verification.
//!
//! Tokens are issued by an external OpenID Connect provider and signed with RS256. The server only ever verifies
//! them: it checks the signature against the configured public key, the expiry (and `nbf`, when present), and the
//! issuer, if one is configured. The verified claims are then made available to handlers via the [`AccessClaims`]
//! extractor.
use std::{collections::HashSet, fmt::Display, str::FromStr};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use jwt_compact::{alg::Rsa, AlgorithmExt, TimeOptions, UntrustedToken};
use log::*;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Alumno,
    Docente,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Alumno => "alumno",
            Role::Docente => "docente",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alumno" => Ok(Role::Alumno),
            "docente" => Ok(Role::Docente),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The subset of an identity provider access token that the server cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The stable external identifier of the principal.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<RealmAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
}

impl AccessClaims {
    pub fn new<S: Into<String>>(sub: S) -> Self {
        Self { sub: sub.into(), realm_access: None, iss: None, preferred_username: None }
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.realm_access = Some(RealmAccess { roles: roles.iter().map(|r| r.to_string()).collect() });
        self
    }

    pub fn with_issuer<S: Into<String>>(mut self, issuer: S) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    pub fn external_id(&self) -> &str {
        &self.sub
    }

    /// The raw realm roles. A token without a `realm_access` claim simply has no roles.
    pub fn realm_roles(&self) -> HashSet<&str> {
        self.realm_access.as_ref().map(|ra| ra.roles.iter().map(String::as_str).collect()).unwrap_or_default()
    }

    /// The realm roles that this server recognises. Anything else the provider put in the token is ignored.
    pub fn roles(&self) -> Vec<Role> {
        self.realm_roles().into_iter().filter_map(|r| r.parse().ok()).collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.realm_roles().contains(role.as_str())
    }
}

/// Handlers behind [`crate::middleware::JwtAuthenticationFactory`] can take `AccessClaims` as an argument.
impl FromRequest for AccessClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<AccessClaims>().cloned().ok_or_else(|| {
            warn!("🔐️ Handler asked for access claims, but the request was not authenticated");
            ServerError::AuthenticationError(AuthError::MissingToken)
        });
        ready(claims)
    }
}

#[derive(Clone, Debug)]
pub struct TokenVerifier {
    key: RsaPublicKey,
    issuer: Option<String>,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self { key: config.jwt_verification_key.clone(), issuer: config.issuer.clone() }
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        let (_, claims) = Rsa::rs256()
            .validator::<AccessClaims>(&self.key)
            .validate(&untrusted)
            .map_err(|e| AuthError::ValidationError(e.to_string()))?
            .into_parts();
        let time_options = TimeOptions::default();
        claims.validate_expiration(&time_options).map_err(|e| AuthError::ValidationError(e.to_string()))?;
        if claims.not_before.is_some() {
            claims.validate_maturity(&time_options).map_err(|e| AuthError::ValidationError(e.to_string()))?;
        }
        let claims = claims.custom;
        if let Some(expected) = &self.issuer {
            if claims.iss.as_deref() != Some(expected.as_str()) {
                let found = claims.iss.as_deref().unwrap_or("(none)");
                return Err(AuthError::ValidationError(format!("Unexpected token issuer: {found}")));
            }
        }
        if claims.sub.trim().is_empty() {
            return Err(AuthError::ValidationError("Token has no subject".to_string()));
        }
        trace!("🔐️ Verified access token for {}", claims.sub);
        Ok(claims)
    }
}
