// src/models/attempt.rs

use serde::Serialize;
use sqlx::FromRow;

/// One row of a student's result history: a 'quiz_attempts' row joined
/// with its subject name. Attempt rows are appended once per graded
/// submission and never updated or deleted.
#[derive(Debug, Serialize, FromRow)]
pub struct AttemptHistory {
    pub subject_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub attempt_date: chrono::DateTime<chrono::Utc>,
}
