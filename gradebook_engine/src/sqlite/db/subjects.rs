use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::Subject;

pub async fn insert_subject(name: &str, teacher_id: i64, conn: &mut SqliteConnection) -> Result<Subject, sqlx::Error> {
    let subject: Subject = sqlx::query_as(
        "INSERT INTO materias (nombre, profesor_id) VALUES ($1, $2) RETURNING id, nombre, profesor_id",
    )
    .bind(name)
    .bind(teacher_id)
    .fetch_one(conn)
    .await?;
    debug!("📚️ Subject '{}' inserted with id {} for teacher {teacher_id}", subject.name, subject.id);
    Ok(subject)
}
