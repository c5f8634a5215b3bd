use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, web::ServiceConfig, App, HttpServer};
use gradebook_engine::{traits::GradebookManagement, GradesApi, SqliteDatabase};
use log::*;

use crate::{
    auth::TokenVerifier,
    config::ServerConfig,
    errors::ServerError,
    middleware::{CorsMiddlewareFactory, JwtAuthenticationFactory},
    routes::{health, MyGradesRoute, MyStudentsRoute},
};

pub const ACCESS_LOG_TARGET: &str = "gbk::access_log";

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        info!("🗃️ Running database migrations");
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let grades_api = GradesApi::new(db.clone());
        let verifier = TokenVerifier::new(&config.auth);
        App::new()
            .wrap(CorsMiddlewareFactory::new(config.cors_origins.clone()))
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target(ACCESS_LOG_TARGET))
            .configure(configure_service(grades_api, verifier))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the health check and the authenticated `/api` scope, backed by `B`.
pub fn configure_service<B>(grades_api: GradesApi<B>, verifier: TokenVerifier) -> impl FnOnce(&mut ServiceConfig)
where B: GradebookManagement + 'static {
    move |cfg| {
        // Routes that require authentication
        let auth_scope = web::scope("/api")
            .wrap(JwtAuthenticationFactory::new(verifier))
            .service(MyGradesRoute::<B>::new())
            .service(MyStudentsRoute::<B>::new());
        cfg.app_data(web::Data::new(grades_api)).service(health).service(auth_scope);
    }
}
