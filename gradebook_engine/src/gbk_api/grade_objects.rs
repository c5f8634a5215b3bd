use serde::{Deserialize, Serialize};

use crate::db_types::{GradeDetail, Score};

/// Reported as the assigned subject of a teacher who has no grades in any of their subjects.
pub const UNASSIGNED_SUBJECT: &str = "Sin Asignación";

//--------------------------------------     StudentGrade     --------------------------------------------------------
/// One row of a student's report card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGrade {
    pub id: i64,
    #[serde(rename = "materia")]
    pub subject: String,
    #[serde(rename = "profesor")]
    pub teacher: String,
    #[serde(rename = "calificacion")]
    pub score: Score,
}

impl From<GradeDetail> for StudentGrade {
    fn from(grade: GradeDetail) -> Self {
        Self { id: grade.grade_id, subject: grade.subject_name, teacher: grade.teacher_name, score: grade.score }
    }
}

//--------------------------------------     RosterEntry      --------------------------------------------------------
/// A single graded student, as seen by the teacher of the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The student's id (not the grade's).
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "calificacion")]
    pub score: Score,
    #[serde(rename = "aprobado")]
    pub passed: bool,
}

impl From<GradeDetail> for RosterEntry {
    fn from(grade: GradeDetail) -> Self {
        let passed = grade.score.is_passing();
        Self { id: grade.student_id, name: grade.student_name, score: grade.score, passed }
    }
}

//--------------------------------------     TeacherRoster    --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRoster {
    /// The subject of the first grade in the result, or [`UNASSIGNED_SUBJECT`] if there are none.
    ///
    /// A teacher owning several subjects is still reported under a single name here.
    #[serde(rename = "materiaImpartida")]
    pub subject_taught: String,
    #[serde(rename = "alumnos")]
    pub students: Vec<RosterEntry>,
}

impl TeacherRoster {
    /// Builds the roster from grades that are already in result order.
    pub fn from_grades(grades: Vec<GradeDetail>) -> Self {
        let subject_taught =
            grades.first().map(|g| g.subject_name.clone()).unwrap_or_else(|| UNASSIGNED_SUBJECT.to_string());
        let students = grades.into_iter().map(RosterEntry::from).collect();
        Self { subject_taught, students }
    }
}
