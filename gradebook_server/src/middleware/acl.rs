//! Access control list middleware for the gradebook server.
//! This middleware can be placed on any route or service behind [`super::JwtAuthenticationFactory`].
//!
//! It reads the verified claims that the authentication middleware left in the request extensions and checks them
//! against the required roles for the route. If the principal holds every required role, the request continues.
//! Otherwise, a 403 Forbidden response is returned and the handler never runs.

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
    auth::{AccessClaims, Role},
    errors::ServerError,
};

pub struct AclMiddlewareFactory {
    required_roles: Vec<Role>,
}

impl AclMiddlewareFactory {
    pub fn new(required_roles: &[Role]) -> Self {
        AclMiddlewareFactory { required_roles: required_roles.to_vec() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AclMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AclMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AclMiddlewareService { required_roles: self.required_roles.clone(), service: Rc::new(service) })
    }
}

pub struct AclMiddlewareService<S> {
    required_roles: Vec<Role>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AclMiddlewareService<S>
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
        let required_roles = self.required_roles.clone();
        Box::pin(async move {
            let claims = req.extensions().get::<AccessClaims>().cloned();
            let claims = match claims {
                Some(c) => c,
                None => {
                    warn!("🔐️ No access claims found in request extensions. Is the authentication middleware missing?");
                    let err = ServerError::Unspecified("No access claims found in request extensions".to_string());
                    return Ok(req.error_response(err).map_into_right_body());
                },
            };
            let missing = required_roles.iter().filter(|role| !claims.has_role(**role)).collect::<Vec<_>>();
            if missing.is_empty() {
                service.call(req).await.map(ServiceResponse::map_into_left_body)
            } else {
                let missing = missing.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ");
                info!("🔐️ {} tried to access {} without the required role(s): {missing}", claims.sub, req.path());
                let err = ServerError::InsufficientPermissions(format!("Required role(s): {missing}"));
                Ok(req.error_response(err).map_into_right_body())
            }
        })
    }
}
