//! `SqliteDatabase` is a concrete implementation of a gradebook backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{grades, new_pool, people};
use crate::{
    db_types::{GradeDetail, Student, Teacher},
    traits::{GradebookError, GradebookManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl GradebookManagement for SqliteDatabase {
    async fn fetch_student_by_external_id(&self, external_id: &str) -> Result<Option<Student>, GradebookError> {
        let mut conn = self.pool.acquire().await?;
        let student = people::student_by_external_id(external_id, &mut conn).await?;
        Ok(student)
    }

    async fn fetch_teacher_by_external_id(&self, external_id: &str) -> Result<Option<Teacher>, GradebookError> {
        let mut conn = self.pool.acquire().await?;
        let teacher = people::teacher_by_external_id(external_id, &mut conn).await?;
        Ok(teacher)
    }

    async fn fetch_grades_for_student(&self, student_id: i64) -> Result<Vec<GradeDetail>, GradebookError> {
        let mut conn = self.pool.acquire().await?;
        let grades = grades::grades_for_student(student_id, &mut conn).await?;
        Ok(grades)
    }

    async fn fetch_grades_for_teacher(&self, teacher_id: i64) -> Result<Vec<GradeDetail>, GradebookError> {
        let mut conn = self.pool.acquire().await?;
        let grades = grades::grades_for_teacher(teacher_id, &mut conn).await?;
        Ok(grades)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, GradebookError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Tables that already exist are left untouched.
    pub async fn run_migrations(&self) -> Result<(), GradebookError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| GradebookError::DatabaseError(format!("Could not run migrations. {e}")))?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), GradebookError> {
        self.pool.close().await;
        Ok(())
    }
}
