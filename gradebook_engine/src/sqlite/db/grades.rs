use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::db_types::{Grade, GradeDetail, NewGrade};

/// Every grade joined with its student, its subject and the subject's owning teacher. Callers append a `WHERE` clause.
const GRADE_DETAIL_QUERY: &str = r#"
    SELECT
        notas.id AS grade_id,
        notas.calificacion AS score,
        notas.fecha_registro AS recorded_on,
        alumnos.id AS student_id,
        alumnos.nombre AS student_name,
        materias.id AS subject_id,
        materias.nombre AS subject_name,
        profesores.id AS teacher_id,
        profesores.nombre AS teacher_name
    FROM notas
        INNER JOIN alumnos ON alumnos.id = notas.alumno_id
        INNER JOIN materias ON materias.id = notas.materia_id
        INNER JOIN profesores ON profesores.id = materias.profesor_id
"#;

/// Fetches all grades for the given student, ordered by grade id.
pub async fn grades_for_student(student_id: i64, conn: &mut SqliteConnection) -> Result<Vec<GradeDetail>, sqlx::Error> {
    let q = format!("{GRADE_DETAIL_QUERY} WHERE notas.alumno_id = $1 ORDER BY notas.id ASC");
    let grades: Vec<GradeDetail> = sqlx::query_as(&q).bind(student_id).fetch_all(conn).await?;
    trace!("📝️ {} grades found for student #{student_id}", grades.len());
    Ok(grades)
}

/// Fetches all grades recorded in subjects owned by the given teacher, ordered by grade id.
pub async fn grades_for_teacher(teacher_id: i64, conn: &mut SqliteConnection) -> Result<Vec<GradeDetail>, sqlx::Error> {
    let q = format!("{GRADE_DETAIL_QUERY} WHERE materias.profesor_id = $1 ORDER BY notas.id ASC");
    let grades: Vec<GradeDetail> = sqlx::query_as(&q).bind(teacher_id).fetch_all(conn).await?;
    trace!("📝️ {} grades found in subjects taught by teacher #{teacher_id}", grades.len());
    Ok(grades)
}

pub async fn insert_grade(grade: NewGrade, conn: &mut SqliteConnection) -> Result<Grade, sqlx::Error> {
    let grade: Grade = sqlx::query_as(
        r#"
            INSERT INTO notas (calificacion, fecha_registro, alumno_id, materia_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, calificacion, fecha_registro, alumno_id, materia_id
        "#,
    )
    .bind(grade.score)
    .bind(grade.recorded_on)
    .bind(grade.student_id)
    .bind(grade.subject_id)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Grade {} recorded for student #{} in subject #{}", grade.score, grade.student_id, grade.subject_id);
    Ok(grade)
}
