//! # Backend contracts
//!
//! This module defines the behaviour a database backend must expose to serve the gradebook.
//!
//! * [`GradebookManagement`] provides the identity lookups (student or teacher by external identity) and the two grade
//!   lookups (by student, and by the teacher owning the subject).
mod gradebook_management;

pub use gradebook_management::{GradebookError, GradebookManagement};
