//! Cross-origin allow-list middleware.
//!
//! Responses to requests from an allowed origin echo the origin back in `Access-Control-Allow-Origin`. Preflight
//! requests are answered here directly, before authentication, since browsers never attach credentials to them.
//! Requests without an `Origin` header pass through untouched.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpResponse,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;

use crate::{
    config::AllowedOrigins,
    errors::ServerError,
    helpers::{apply_cors_headers, apply_preflight_headers, is_preflight, request_origin},
};

pub struct CorsMiddlewareFactory {
    allowed: Rc<AllowedOrigins>,
}

impl CorsMiddlewareFactory {
    pub fn new(allowed: AllowedOrigins) -> Self {
        Self { allowed: Rc::new(allowed) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsMiddlewareService { allowed: Rc::clone(&self.allowed), service: Rc::new(service) })
    }
}

pub struct CorsMiddlewareService<S> {
    allowed: Rc<AllowedOrigins>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
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
        let origin = request_origin(&req);
        let allowed_origin = origin.as_deref().filter(|o| self.allowed.permits(o)).map(String::from);
        Box::pin(async move {
            if is_preflight(&req) {
                let res = match &allowed_origin {
                    Some(o) => {
                        trace!("🌐️ Accepted preflight from {o} for {}", req.path());
                        let mut res = HttpResponse::NoContent().finish();
                        apply_cors_headers(res.headers_mut(), o);
                        apply_preflight_headers(res.headers_mut());
                        req.into_response(res)
                    },
                    None => {
                        let o = origin.as_deref().unwrap_or("(none)");
                        info!("🌐️ Rejected preflight from origin {o} for {}", req.path());
                        req.error_response(ServerError::InsufficientPermissions(format!("Origin {o} is not allowed")))
                    },
                };
                return Ok(res.map_into_right_body());
            }
            let mut res = service.call(req).await?;
            if let Some(o) = &allowed_origin {
                apply_cors_headers(res.headers_mut(), o);
            }
            Ok(res.map_into_left_body())
        })
    }
}
