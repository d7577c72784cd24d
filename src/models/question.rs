// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Question as shown to a student taking a quiz: one multiple-choice item
/// with four options. The correct option index stays server-side; grading
/// reads it through `grading::AnswerKey`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
}

/// Form body for `/add_question`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddQuestionForm {
    pub subject_id: i64,
    #[validate(length(min = 1, message = "Question text is required."))]
    pub question_text: String,
    #[validate(length(min = 1, message = "All four options are required."))]
    pub option1: String,
    #[validate(length(min = 1, message = "All four options are required."))]
    pub option2: String,
    #[validate(length(min = 1, message = "All four options are required."))]
    pub option3: String,
    #[validate(length(min = 1, message = "All four options are required."))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "Correct answer must be between 1 and 4."))]
    pub correct_answer: i16,
}

/// Joined row for the admin dashboard question listing.
#[derive(Debug, Serialize, FromRow)]
pub struct QuestionSummary {
    pub id: i64,
    pub question_text: String,
    pub subject_name: String,
}
