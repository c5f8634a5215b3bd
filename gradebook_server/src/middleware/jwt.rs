//! Bearer token authentication middleware.
//!
//! Wrap a scope with [`JwtAuthenticationFactory`] and every request in it must carry a valid
//! `Authorization: Bearer <token>` header. On success the verified [`AccessClaims`] are inserted into the request
//! extensions, where [`super::AclMiddlewareFactory`] and the handlers pick them up. On failure the request is
//! answered with `401 Unauthorized`.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;

use crate::{
    auth::{AccessClaims, TokenVerifier},
    errors::{AuthError, ServerError},
    helpers::bearer_token,
};

pub struct JwtAuthenticationFactory {
    verifier: Rc<TokenVerifier>,
}

impl JwtAuthenticationFactory {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier: Rc::new(verifier) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthenticationFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthenticationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtAuthenticationService { verifier: Rc::clone(&self.verifier), service: Rc::new(service) })
    }
}

pub struct JwtAuthenticationService<S> {
    verifier: Rc<TokenVerifier>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthenticationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Rc::clone(&self.verifier);
        Box::pin(async move {
            match authenticate(&req, &verifier) {
                Ok(claims) => {
                    let name = claims.preferred_username.as_deref().unwrap_or("?");
                    let roles = claims.roles();
                    debug!("🔐️ Authenticated {name} ({}) with roles {roles:?} for {}", claims.sub, req.path());
                    req.extensions_mut().insert(claims);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                },
                Err(e) => {
                    info!("🔐️ Rejected request to {}. {e}", req.path());
                    Ok(req.error_response(ServerError::AuthenticationError(e)).map_into_right_body())
                },
            }
        })
    }
}

fn authenticate(req: &ServiceRequest, verifier: &TokenVerifier) -> Result<AccessClaims, AuthError> {
    let token = bearer_token(req.headers())?;
    verifier.verify(token)
}
