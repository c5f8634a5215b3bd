use actix_web::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    test,
    test::TestRequest,
    App,
};
use chrono::{Duration, Utc};

use super::{
    helpers::{claims_for, get_auth_config, get_request, issue_foreign_token, issue_token, TEST_ISSUER},
    mocks::MockGradebookManager,
};
use crate::{
    auth::{AccessClaims, TokenVerifier},
    server::configure_service,
};

const STUDENT_PATH: &str = "/api/alumno/mis-calificaciones";
const TEACHER_PATH: &str = "/api/profesor/mis-alumnos";

/// A backend that panics on any lookup, so these tests also prove that rejected requests never reach the database.
fn untouchable_db() -> MockGradebookManager {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_student_by_external_id().never();
    db.expect_fetch_teacher_by_external_id().never();
    db
}

fn in_five_minutes() -> chrono::DateTime<Utc> {
    Utc::now() + Duration::minutes(5)
}

#[actix_web::test]
async fn no_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No bearer token was provided."}"#);
}

#[actix_web::test]
async fn unauthorized_responses_carry_challenge() {
    let app = App::new().configure(configure_service(
        gradebook_engine::GradesApi::new(untouchable_db()),
        TokenVerifier::new(&get_auth_config()),
    ));
    let service = test::init_service(app).await;
    let req = TestRequest::get().uri(TEACHER_PATH).to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[actix_web::test]
async fn garbage_token() {
    let (status, body) = get_request("not-a-jwt", TEACHER_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.starts_with(r#"{"error":"Authentication Error. Access token is not in the correct format."#), "{body}");
}

#[actix_web::test]
async fn token_signed_by_someone_else() {
    let token = issue_foreign_token(claims_for("kc-luis", &["alumno"]), in_five_minutes());
    let (status, body) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token is invalid."), "{body}");
}

#[actix_web::test]
async fn expired_token() {
    let token = issue_token(claims_for("kc-luis", &["alumno"]), Utc::now() - Duration::days(1));
    let (status, body) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token is invalid."), "{body}");
}

#[actix_web::test]
async fn token_from_another_issuer() {
    let claims = AccessClaims::new("kc-luis").with_roles(&["alumno"]).with_issuer("https://evil.example/realms/x");
    let token = issue_token(claims, in_five_minutes());
    let (status, body) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Unexpected token issuer"), "{body}");
}

#[actix_web::test]
async fn token_without_issuer() {
    let token = issue_token(AccessClaims::new("kc-luis").with_roles(&["alumno"]), in_five_minutes());
    let (status, _) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_without_subject() {
    let token = issue_token(claims_for("", &["alumno"]), in_five_minutes());
    let (status, body) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Token has no subject"), "{body}");
}

#[actix_web::test]
async fn token_without_realm_access_has_no_roles() {
    let token = issue_token(AccessClaims::new("kc-luis").with_issuer(TEST_ISSUER), in_five_minutes());
    let (status, _) = get_request(&token, STUDENT_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let token = issue_token(AccessClaims::new("kc-ana").with_issuer(TEST_ISSUER), in_five_minutes());
    let (status, _) = get_request(&token, TEACHER_PATH, untouchable_db()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn health_needs_no_token() {
    let (status, body) = get_request("", "/health", untouchable_db()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}
