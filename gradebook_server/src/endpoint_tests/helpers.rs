use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    test,
    test::TestRequest,
    App,
};
use chrono::{DateTime, Duration, Utc};
use gradebook_engine::{traits::GradebookManagement, GradesApi};
use jwt_compact::{alg::Rsa, AlgorithmExt, Claims, Header};
use log::debug;
use rsa::{pkcs8::DecodePrivateKey, RsaPrivateKey};

use crate::{
    auth::{AccessClaims, TokenVerifier},
    config::{parse_verification_key, AuthConfig},
    server::configure_service,
};

pub const TEST_ISSUER: &str = "https://sso.example.edu/realms/escuela";
// Test-only keypairs. DO NOT re-use these keys anywhere.
const TEST_SIGNING_KEY: &str = include_str!("keys/test_signing_key.pem");
const TEST_VERIFICATION_KEY: &str = include_str!("keys/test_verification_key.pem");
const OTHER_SIGNING_KEY: &str = include_str!("keys/other_signing_key.pem");

pub fn get_auth_config() -> AuthConfig {
    let key = parse_verification_key(TEST_VERIFICATION_KEY).expect("Invalid test verification key");
    AuthConfig::new(key, Some(TEST_ISSUER.to_string()))
}

pub fn claims_for(sub: &str, roles: &[&str]) -> AccessClaims {
    AccessClaims::new(sub).with_roles(roles).with_issuer(TEST_ISSUER)
}

pub fn issue_token(claims: AccessClaims, expiry: DateTime<Utc>) -> String {
    sign_token(claims, expiry, TEST_SIGNING_KEY)
}

/// Signs a token with a key the server does not trust.
pub fn issue_foreign_token(claims: AccessClaims, expiry: DateTime<Utc>) -> String {
    sign_token(claims, expiry, OTHER_SIGNING_KEY)
}

/// A token for `sub` with the given realm roles that is valid for the next five minutes.
pub fn valid_token(sub: &str, roles: &[&str]) -> String {
    issue_token(claims_for(sub, roles), Utc::now() + Duration::minutes(5))
}

fn sign_token(claims: AccessClaims, expiry: DateTime<Utc>, signing_key_pem: &str) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(signing_key_pem).expect("Invalid test signing key");
    let header = Header::empty().with_token_type("JWT");
    let mut claims = Claims::new(claims);
    claims.expiration = Some(expiry);
    Rsa::rs256().token(&header, &claims, &key).expect("Failed to sign token")
}

/// Sends a GET request through the full authentication and authorisation pipeline, backed by `backend`.
/// An empty `token` sends no `Authorization` header at all.
pub async fn get_request<B>(token: &str, path: &str, backend: B) -> (StatusCode, String)
where B: GradebookManagement + 'static {
    let mut req = TestRequest::get().uri(path);
    if !token.is_empty() {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    let verifier = TokenVerifier::new(&get_auth_config());
    let app = App::new().configure(configure_service(GradesApi::new(backend), verifier));
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}
