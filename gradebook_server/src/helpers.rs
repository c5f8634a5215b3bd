use actix_web::{
    dev::ServiceRequest,
    http::{
        header::{
            HeaderMap,
            HeaderValue,
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_MAX_AGE,
            ACCESS_CONTROL_REQUEST_METHOD,
            AUTHORIZATION,
            ORIGIN,
            VARY,
        },
        Method,
    },
};

use crate::errors::AuthError;

pub const CORS_ALLOWED_METHODS: &str = "GET, OPTIONS";
pub const CORS_ALLOWED_HEADERS: &str = "Authorization, Content-Type";
pub const CORS_MAX_AGE_SECS: &str = "3600";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::PoorlyFormattedToken("Authorization header is not valid ASCII".to_string()))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AuthError::PoorlyFormattedToken("Expected 'Bearer <token>'".to_string()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::PoorlyFormattedToken(format!("Unsupported authorization scheme: {scheme}")));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// The value of the `Origin` header, if it has one.
pub fn request_origin(req: &ServiceRequest) -> Option<String> {
    req.headers().get(ORIGIN).and_then(|v| v.to_str().ok()).map(String::from)
}

pub fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

/// Headers sent with every response to an allowed origin.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
}

/// Extra headers that answer a preflight request.
pub fn apply_preflight_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(CORS_ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOWED_HEADERS));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(CORS_MAX_AGE_SECS));
}
