// src/models/subject.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'subjects' table: a named quiz category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

/// Form body for `/add_subject`.
#[derive(Debug, Deserialize)]
pub struct AddSubjectForm {
    pub subject_name: String,
}
