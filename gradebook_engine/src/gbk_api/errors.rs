use thiserror::Error;

use crate::traits::GradebookError;

#[derive(Debug, Clone, Error)]
pub enum GradesApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("No student is registered for identity {0}")]
    StudentNotRegistered(String),
    #[error("No teacher is registered for identity {0}")]
    TeacherNotRegistered(String),
}

impl From<GradebookError> for GradesApiError {
    fn from(e: GradebookError) -> Self {
        match e {
            GradebookError::DatabaseError(s) => Self::DatabaseError(s),
        }
    }
}
