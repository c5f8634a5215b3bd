//! # Gradebook public API
//!
//! The `gbk_api` module exposes the programmatic API for the gradebook.
//!
//! * [`grades_api`] resolves an authenticated principal to a local student or teacher record and assembles the grade
//!   views for them.
//! * [`grade_objects`] contains the response shapes of those views.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits required by the API.
//!
//! ```rust,ignore
//! use gradebook_engine::{GradesApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/gradebook.db", 5).await?;
//! // SqliteDatabase implements GradebookManagement
//! let api = GradesApi::new(db);
//! let grades = api.student_grades("a-subject-id-from-the-token").await?;
//! ```

pub mod errors;
pub mod grade_objects;
pub mod grades_api;
