//! # Gradebook server
//! This module hosts the HTTP server for the gradebook. It is responsible for:
//! Verifying the bearer tokens issued by the identity provider.
//! Enforcing the `alumno` and `docente` realm roles on each endpoint.
//! Resolving the authenticated principal to a local student or teacher and returning their grade view as JSON.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/alumno/mis-calificaciones`: The grades of the authenticated student.
//! * `/api/profesor/mis-alumnos`: The subject and graded students of the authenticated teacher.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod middleware;
pub mod routes;
pub mod server;
