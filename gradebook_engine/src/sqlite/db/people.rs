//! Students and teachers share a shape: a name, an optional email and the identity-provider subject they log in with.
use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::db_types::{NewPerson, Student, Teacher};

/// Fetches the student whose `keycloak_id` matches `external_id`. The column is unique, so at most one row matches.
pub async fn student_by_external_id(
    external_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Student>, sqlx::Error> {
    trace!("🧑️ Looking up student for identity [{external_id}]");
    let student = sqlx::query_as("SELECT id, nombre, email, keycloak_id FROM alumnos WHERE keycloak_id = $1")
        .bind(external_id)
        .fetch_optional(conn)
        .await?;
    Ok(student)
}

/// Fetches the teacher whose `keycloak_id` matches `external_id`. The column is unique, so at most one row matches.
pub async fn teacher_by_external_id(
    external_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Teacher>, sqlx::Error> {
    trace!("🧑️ Looking up teacher for identity [{external_id}]");
    let teacher = sqlx::query_as("SELECT id, nombre, email, keycloak_id FROM profesores WHERE keycloak_id = $1")
        .bind(external_id)
        .fetch_optional(conn)
        .await?;
    Ok(teacher)
}

/// Inserts a new student. Fails if the external identity is already linked to another student.
pub async fn insert_student(student: NewPerson, conn: &mut SqliteConnection) -> Result<Student, sqlx::Error> {
    let student: Student = sqlx::query_as(
        r#"
            INSERT INTO alumnos (nombre, email, keycloak_id)
            VALUES ($1, $2, $3)
            RETURNING id, nombre, email, keycloak_id
        "#,
    )
    .bind(student.name)
    .bind(student.email)
    .bind(student.external_id)
    .fetch_one(conn)
    .await?;
    debug!("🧑️ Student [{}] inserted with id {}", student.external_id, student.id);
    Ok(student)
}

/// Inserts a new teacher. Fails if the external identity is already linked to another teacher.
pub async fn insert_teacher(teacher: NewPerson, conn: &mut SqliteConnection) -> Result<Teacher, sqlx::Error> {
    let teacher: Teacher = sqlx::query_as(
        r#"
            INSERT INTO profesores (nombre, email, keycloak_id)
            VALUES ($1, $2, $3)
            RETURNING id, nombre, email, keycloak_id
        "#,
    )
    .bind(teacher.name)
    .bind(teacher.email)
    .bind(teacher.external_id)
    .fetch_one(conn)
    .await?;
    debug!("🧑️ Teacher [{}] inserted with id {}", teacher.external_id, teacher.id);
    Ok(teacher)
}
