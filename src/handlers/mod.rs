//! HTTP handlers for student CRUD and service probes.

pub mod common;
pub mod student;
