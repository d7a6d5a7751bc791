//! Data access for the `students` table.

mod memory;
mod postgres;

pub use memory::InMemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::error::StoreError;
use crate::models::{NewStudent, Student};
use async_trait::async_trait;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All records in storage order. Empty storage yields an empty vec.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// `Ok(None)` when no record has this id.
    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError>;

    /// Insert and return the stored record with id and timestamps assigned.
    async fn create(&self, student: &NewStudent) -> Result<Student, StoreError>;

    /// Overwrite every user field of `id` and refresh `updated_at`.
    async fn update(&self, id: i32, student: &NewStudent) -> Result<Student, StoreError>;

    /// Hard delete. `StoreError::NotFound` when nothing was removed.
    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
