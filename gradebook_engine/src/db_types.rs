//! Record shapes read from the gradebook database.
//!
//! Field names are English; the `#[sqlx(rename)]` attributes map them onto the column names of the shared schema,
//! which is owned by the provisioning tooling.
use chrono::NaiveDate;
pub use gradebook_common::Score;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------       Student       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
    pub email: Option<String>,
    /// The subject identifier issued by the identity provider. Unique, and never changes once provisioned.
    #[sqlx(rename = "keycloak_id")]
    pub external_id: String,
}

//--------------------------------------       Teacher       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
    pub email: Option<String>,
    #[sqlx(rename = "keycloak_id")]
    pub external_id: String,
}

//--------------------------------------       Subject       ---------------------------------------------------------
/// A subject always has exactly one owning teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[sqlx(rename = "profesor_id")]
    pub teacher_id: i64,
}

//--------------------------------------        Grade        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub id: i64,
    #[sqlx(rename = "calificacion")]
    pub score: Score,
    #[sqlx(rename = "fecha_registro")]
    pub recorded_on: Option<NaiveDate>,
    #[sqlx(rename = "alumno_id")]
    pub student_id: i64,
    #[sqlx(rename = "materia_id")]
    pub subject_id: i64,
}

//--------------------------------------     GradeDetail     ---------------------------------------------------------
/// A grade joined with its student, its subject and the subject's owning teacher.
///
/// Both grade lookups return this shape, so the views can be assembled without further queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GradeDetail {
    pub grade_id: i64,
    pub score: Score,
    pub recorded_on: Option<NaiveDate>,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
}

//--------------------------------------     New records     ---------------------------------------------------------
/// A person record as supplied by provisioning. Used for both students and teachers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub email: Option<String>,
    pub external_id: String,
}

impl NewPerson {
    pub fn new<S: Into<String>>(name: S, external_id: S) -> Self {
        Self { name: name.into(), email: None, external_id: external_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGrade {
    pub score: Score,
    pub recorded_on: Option<NaiveDate>,
    pub student_id: i64,
    pub subject_id: i64,
}

impl NewGrade {
    pub fn new(student_id: i64, subject_id: i64, score: Score) -> Self {
        Self { score, recorded_on: None, student_id, subject_id }
    }

    pub fn recorded_on(mut self, date: NaiveDate) -> Self {
        self.recorded_on = Some(date);
        self
    }
}
