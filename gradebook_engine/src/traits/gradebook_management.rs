use thiserror::Error;

use crate::db_types::{GradeDetail, Student, Teacher};

#[derive(Debug, Clone, Error)]
pub enum GradebookError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for GradebookError {
    fn from(e: sqlx::Error) -> Self {
        GradebookError::DatabaseError(e.to_string())
    }
}

/// The `GradebookManagement` trait defines the read-only lookups that back the grade views.
///
/// Every method is a single query. Absence of a record is reported as `Ok(None)`; deciding what a missing record
/// means is left to the caller (see [`crate::GradesApi`]).
///
/// Grade lookups return [`GradeDetail`] rows in ascending grade id order, so repeated calls over unchanged data
/// produce identical results.
#[allow(async_fn_in_trait)]
pub trait GradebookManagement {
    /// Fetches the student linked to the given identity-provider subject, if one has been provisioned.
    async fn fetch_student_by_external_id(&self, external_id: &str) -> Result<Option<Student>, GradebookError>;

    /// Fetches the teacher linked to the given identity-provider subject, if one has been provisioned.
    async fn fetch_teacher_by_external_id(&self, external_id: &str) -> Result<Option<Teacher>, GradebookError>;

    /// Fetches every grade recorded for the student.
    async fn fetch_grades_for_student(&self, student_id: i64) -> Result<Vec<GradeDetail>, GradebookError>;

    /// Fetches every grade recorded in any subject owned by the teacher.
    async fn fetch_grades_for_teacher(&self, teacher_id: i64) -> Result<Vec<GradeDetail>, GradebookError>;
}
