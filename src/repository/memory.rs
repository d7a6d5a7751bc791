//! In-process repository with the same uniqueness rules as the `students` table.
//! Used by tests.

use super::StudentRepository;
use crate::error::{ConflictField, StoreError};
use crate::models::{NewStudent, Student};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Student>,
}

impl Table {
    /// Returns the colliding field if another row (not `except`) already holds the email or student id.
    fn collision(&self, student: &NewStudent, except: Option<i32>) -> Option<ConflictField> {
        let others = self.rows.values().filter(|r| Some(r.id) != except);
        for row in others {
            if row.email == student.email {
                return Some(ConflictField::Email);
            }
            if row.student_id == student.student_id {
                return Some(ConflictField::StudentId);
            }
        }
        None
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    table: Mutex<Table>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        // Rows are only written after every check passes, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn create(&self, student: &NewStudent) -> Result<Student, StoreError> {
        let mut table = self.lock();
        if let Some(field) = table.collision(student, None) {
            return Err(StoreError::Conflict(field));
        }
        table.next_id += 1;
        let now = Utc::now();
        let row = Student {
            id: table.next_id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            student_id: student.student_id.clone(),
            course: student.course.clone(),
            year_of_study: student.year_of_study,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, student: &NewStudent) -> Result<Student, StoreError> {
        let mut table = self.lock();
        if let Some(field) = table.collision(student, Some(id)) {
            return Err(StoreError::Conflict(field));
        }
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.first_name = student.first_name.clone();
        row.last_name = student.last_name.clone();
        row.email = student.email.clone();
        row.student_id = student.student_id.clone();
        row.course = student.course.clone();
        row.year_of_study = student.year_of_study;
        row.updated_at = Utc::now().max(row.updated_at + Duration::microseconds(1));
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.lock().rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
