//! PostgreSQL-backed repository.

use super::StudentRepository;
use crate::error::StoreError;
use crate::models::{NewStudent, Student};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str =
    "id, first_name, last_name, email, student_id, course, year_of_study, created_at, updated_at";

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        PgStudentRepository { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let rows = sqlx::query_as::<_, Student>(&format!("SELECT {} FROM students", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, Student>(&format!("SELECT {} FROM students WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, student: &NewStudent) -> Result<Student, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO students (first_name, last_name, email, student_id, course, year_of_study)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.student_id)
            .bind(&student.course)
            .bind(student.year_of_study)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, student: &NewStudent) -> Result<Student, StoreError> {
        // GREATEST keeps updated_at strictly increasing even if the server clock steps back.
        let sql = format!(
            r#"
            UPDATE students
            SET first_name = $1, last_name = $2, email = $3, student_id = $4, course = $5, year_of_study = $6,
                updated_at = GREATEST(CURRENT_TIMESTAMP, updated_at + INTERVAL '1 microsecond')
            WHERE id = $7
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.student_id)
            .bind(&student.course)
            .bind(student.year_of_study)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
