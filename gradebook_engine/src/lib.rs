//! Gradebook Engine
//!
//! This library holds everything behind the gradebook HTTP surface. It is transport-agnostic.
//!
//! The library is divided into three sections:
//! 1. The entity model ([`mod@db_types`]): students, teachers, subjects and grades, as read from the shared schema.
//! 2. Database backends. The [`GradebookManagement`] trait defines the lookups a backend must provide, and
//!    [`SqliteDatabase`] implements it. You should rarely need the low-level query functions directly.
//! 3. The public API ([`GradesApi`]), which resolves an external identity to a local record and assembles the
//!    student and teacher grade views.
pub mod db_types;
mod gbk_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use gbk_api::{
    errors::GradesApiError,
    grade_objects::{self, RosterEntry, StudentGrade, TeacherRoster, UNASSIGNED_SUBJECT},
    grades_api::GradesApi,
};
pub use traits::{GradebookError, GradebookManagement};
