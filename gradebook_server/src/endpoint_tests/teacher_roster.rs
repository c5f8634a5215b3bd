use actix_web::http::StatusCode;

use super::{
    helpers::{get_request, valid_token},
    mocks::{grade, student, teacher, MockGradebookManager},
};

const PATH: &str = "/api/profesor/mis-alumnos";

#[actix_web::test]
async fn teacher_sees_roster_with_pass_marks() {
    let _ = env_logger::try_init().ok();
    let mut db = MockGradebookManager::new();
    db.expect_fetch_teacher_by_external_id()
        .withf(|id| id == "kc-ana")
        .times(1)
        .returning(|_| Ok(Some(teacher(7, "Ana Pérez", "kc-ana"))));
    db.expect_fetch_grades_for_teacher().withf(|id| *id == 7).times(1).returning(|_| {
        let ana = teacher(7, "Ana Pérez", "kc-ana");
        let luis = student(1, "Luis Gómez", "kc-luis");
        let marta = student(2, "Marta Díaz", "kc-marta");
        let pau = student(3, "Pau Soler", "kc-pau");
        Ok(vec![
            grade(10, "8.5", &luis, (3, "Matemáticas"), &ana),
            grade(12, "5.99", &marta, (3, "Matemáticas"), &ana),
            grade(13, "6", &pau, (3, "Matemáticas"), &ana),
        ])
    });
    let token = valid_token("kc-ana", &["docente"]);
    let (status, body) = get_request(&token, PATH, db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"materiaImpartida":"Matemáticas","alumnos":[{"id":1,"nombre":"Luis Gómez","calificacion":8.5,"aprobado":true},{"id":2,"nombre":"Marta Díaz","calificacion":5.99,"aprobado":false},{"id":3,"nombre":"Pau Soler","calificacion":6.0,"aprobado":true}]}"#
    );
}

#[actix_web::test]
async fn roster_is_named_after_the_first_grade() {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_teacher_by_external_id().returning(|_| Ok(Some(teacher(8, "Jorge Ruiz", "kc-jorge"))));
    db.expect_fetch_grades_for_teacher().returning(|_| {
        let jorge = teacher(8, "Jorge Ruiz", "kc-jorge");
        let luis = student(1, "Luis Gómez", "kc-luis");
        Ok(vec![grade(20, "7", &luis, (4, "Historia"), &jorge), grade(21, "9", &luis, (5, "Geografía"), &jorge)])
    });
    let token = valid_token("kc-jorge", &["docente"]);
    let (status, body) = get_request(&token, PATH, db).await;
    assert_eq!(status, StatusCode::OK);
    let roster: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(roster["materiaImpartida"], "Historia");
    assert_eq!(roster["alumnos"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn teacher_without_grades_is_unassigned() {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_teacher_by_external_id().returning(|_| Ok(Some(teacher(9, "Eva Mora", "kc-eva"))));
    db.expect_fetch_grades_for_teacher().returning(|_| Ok(vec![]));
    let token = valid_token("kc-eva", &["docente"]);
    let (status, body) = get_request(&token, PATH, db).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"materiaImpartida":"Sin Asignación","alumnos":[]}"#);
}

#[actix_web::test]
async fn unregistered_teacher_is_not_found() {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_teacher_by_external_id().returning(|_| Ok(None));
    db.expect_fetch_grades_for_teacher().never();
    let token = valid_token("kc-ghost", &["docente"]);
    let (status, body) = get_request(&token, PATH, db).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Not registered. No teacher is registered for identity kc-ghost"}"#);
}

#[actix_web::test]
async fn student_role_cannot_read_roster() {
    let mut db = MockGradebookManager::new();
    db.expect_fetch_teacher_by_external_id().never();
    let token = valid_token("kc-luis", &["alumno", "offline_access"]);
    let (status, _) = get_request(&token, PATH, db).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
