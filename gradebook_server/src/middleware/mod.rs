mod acl;
mod cors;
mod jwt;

pub use acl::{AclMiddlewareFactory, AclMiddlewareService};
pub use cors::{CorsMiddlewareFactory, CorsMiddlewareService};
pub use jwt::{JwtAuthenticationFactory, JwtAuthenticationService};
