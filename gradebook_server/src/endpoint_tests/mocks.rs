use gradebook_engine::{
    db_types::{GradeDetail, Student, Teacher},
    traits::{GradebookError, GradebookManagement},
};
use mockall::mock;

mock! {
    pub GradebookManager {}
    impl GradebookManagement for GradebookManager {
        async fn fetch_student_by_external_id(&self, external_id: &str) -> Result<Option<Student>, GradebookError>;
        async fn fetch_teacher_by_external_id(&self, external_id: &str) -> Result<Option<Teacher>, GradebookError>;
        async fn fetch_grades_for_student(&self, student_id: i64) -> Result<Vec<GradeDetail>, GradebookError>;
        async fn fetch_grades_for_teacher(&self, teacher_id: i64) -> Result<Vec<GradeDetail>, GradebookError>;
    }
}

pub fn student(id: i64, name: &str, external_id: &str) -> Student {
    Student { id, name: name.to_string(), email: None, external_id: external_id.to_string() }
}

pub fn teacher(id: i64, name: &str, external_id: &str) -> Teacher {
    Teacher { id, name: name.to_string(), email: None, external_id: external_id.to_string() }
}

pub fn grade(grade_id: i64, score: &str, student: &Student, subject: (i64, &str), teacher: &Teacher) -> GradeDetail {
    GradeDetail {
        grade_id,
        score: score.parse().expect("Invalid test score"),
        recorded_on: None,
        student_id: student.id,
        student_name: student.name.clone(),
        subject_id: subject.0,
        subject_name: subject.1.to_string(),
        teacher_id: teacher.id,
        teacher_name: teacher.name.clone(),
    }
}
