//! Resolves authenticated principals to local records and assembles their grade views.

use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    gbk_api::{
        errors::GradesApiError,
        grade_objects::{StudentGrade, TeacherRoster},
    },
    traits::GradebookManagement,
};

/// The `GradesApi` composes the identity lookup and the grade lookup for both views.
///
/// An external identity that has no local record is an error ([`GradesApiError::StudentNotRegistered`] or
/// [`GradesApiError::TeacherNotRegistered`]), which is distinct from a registered principal with no grades (an empty
/// result).
pub struct GradesApi<B> {
    db: B,
}

impl<B: Debug> Debug for GradesApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GradesApi ({:?})", self.db)
    }
}

impl<B> GradesApi<B>
where B: GradebookManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Every grade of the student linked to `external_id`, in grade id order.
    pub async fn student_grades(&self, external_id: &str) -> Result<Vec<StudentGrade>, GradesApiError> {
        let student = self
            .db
            .fetch_student_by_external_id(external_id)
            .await?
            .ok_or_else(|| GradesApiError::StudentNotRegistered(external_id.to_string()))?;
        trace!("📝️ Identity {external_id} resolved to student #{}", student.id);
        let grades = self.db.fetch_grades_for_student(student.id).await?;
        debug!("📝️ Student #{} has {} grades", student.id, grades.len());
        Ok(grades.into_iter().map(StudentGrade::from).collect())
    }

    /// The roster of graded students across the subjects owned by the teacher linked to `external_id`.
    pub async fn teacher_roster(&self, external_id: &str) -> Result<TeacherRoster, GradesApiError> {
        let teacher = self
            .db
            .fetch_teacher_by_external_id(external_id)
            .await?
            .ok_or_else(|| GradesApiError::TeacherNotRegistered(external_id.to_string()))?;
        trace!("📝️ Identity {external_id} resolved to teacher #{}", teacher.id);
        let grades = self.db.fetch_grades_for_teacher(teacher.id).await?;
        debug!("📝️ Teacher #{} has {} graded students", teacher.id, grades.len());
        Ok(TeacherRoster::from_grades(grades))
    }
}
