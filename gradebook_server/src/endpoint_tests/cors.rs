use actix_web::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_METHOD,
            AUTHORIZATION,
            ORIGIN,
            VARY,
        },
        Method,
        StatusCode,
    },
    test,
    test::TestRequest,
    App,
};
use gradebook_engine::GradesApi;

use super::{
    helpers::{get_auth_config, valid_token},
    mocks::{student, MockGradebookManager},
};
use crate::{
    auth::TokenVerifier,
    config::AllowedOrigins,
    middleware::CorsMiddlewareFactory,
    server::configure_service,
};

const FRONTEND: &str = "http://localhost:3000";
const PATH: &str = "/api/alumno/mis-calificaciones";

fn allowed() -> AllowedOrigins {
    AllowedOrigins::from_env_value(Some(FRONTEND.to_string()))
}

macro_rules! cors_app {
    ($origins:expr, $db:expr) => {
        test::init_service(
            App::new()
                .wrap(CorsMiddlewareFactory::new($origins))
                .configure(configure_service(GradesApi::new($db), TokenVerifier::new(&get_auth_config()))),
        )
        .await
    };
}

fn preflight(origin: &str) -> TestRequest {
    TestRequest::default()
        .method(Method::OPTIONS)
        .uri(PATH)
        .insert_header((ORIGIN, origin))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .insert_header(("Access-Control-Request-Headers", "authorization"))
}

#[actix_web::test]
async fn preflight_from_allowed_origin_skips_authentication() {
    let _ = env_logger::try_init().ok();
    let app = cors_app!(allowed(), MockGradebookManager::new());
    let res = test::call_service(&app, preflight(FRONTEND).to_request()).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), FRONTEND);
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "GET, OPTIONS");
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "Authorization, Content-Type");
}

#[actix_web::test]
async fn preflight_from_unknown_origin_is_refused() {
    let app = cors_app!(allowed(), MockGradebookManager::new());
    let res = test::call_service(&app, preflight("https://evil.example").to_request()).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[actix_web::test]
async fn allowed_origin_is_echoed_on_success_and_failure() {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_student_by_external_id().returning(|_| Ok(Some(student(1, "Luis Gómez", "kc-luis"))));
    db.expect_fetch_grades_for_student().returning(|_| Ok(vec![]));
    let app = cors_app!(allowed(), db);

    let token = valid_token("kc-luis", &["alumno"]);
    let req = TestRequest::get()
        .uri(PATH)
        .insert_header((ORIGIN, FRONTEND))
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), FRONTEND);
    assert_eq!(res.headers().get(VARY).unwrap(), "Origin");

    // Browsers can only read the 401 if the CORS headers are on it too
    let req = TestRequest::get().uri(PATH).insert_header((ORIGIN, FRONTEND)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), FRONTEND);
}

#[actix_web::test]
async fn unknown_origin_gets_no_cors_headers() {
    let app = cors_app!(allowed(), MockGradebookManager::new());
    let req = TestRequest::get().uri("/health").insert_header((ORIGIN, "https://evil.example")).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[actix_web::test]
async fn wildcard_allows_any_origin() {
    let app = cors_app!(AllowedOrigins::Any, MockGradebookManager::new());
    let res = test::call_service(&app, preflight("https://anywhere.example").to_request()).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "https://anywhere.example");
}
