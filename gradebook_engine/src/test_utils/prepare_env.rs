use log::*;

use crate::{
    db_types::{Grade, NewGrade, NewPerson, Score, Student, Subject, Teacher},
    sqlite::db::{grades, people, subjects},
    SqliteDatabase,
};

pub const IN_MEMORY_DB_URL: &str = "sqlite::memory:";

/// Creates a fresh in-memory database with the schema applied.
///
/// The pool holds a single connection, since every in-memory connection is its own database.
pub async fn prepare_test_env() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    let db = SqliteDatabase::new_with_url(IN_MEMORY_DB_URL, 1).await.expect("Error creating in-memory database");
    db.run_migrations().await.expect("Error running DB migrations");
    db
}

pub async fn seed_student(db: &SqliteDatabase, name: &str, external_id: &str) -> Student {
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    people::insert_student(NewPerson::new(name, external_id), &mut conn).await.expect("Error inserting student")
}

pub async fn seed_teacher(db: &SqliteDatabase, name: &str, external_id: &str) -> Teacher {
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    people::insert_teacher(NewPerson::new(name, external_id), &mut conn).await.expect("Error inserting teacher")
}

pub async fn seed_subject(db: &SqliteDatabase, name: &str, teacher: &Teacher) -> Subject {
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    subjects::insert_subject(name, teacher.id, &mut conn).await.expect("Error inserting subject")
}

pub async fn seed_grade(db: &SqliteDatabase, student: &Student, subject: &Subject, score: &str) -> Grade {
    let score = score.parse::<Score>().expect("Invalid score");
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    grades::insert_grade(NewGrade::new(student.id, subject.id, score), &mut conn).await.expect("Error inserting grade")
}
