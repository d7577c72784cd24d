// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    flash,
    grading::{self, AnswerKey},
    models::{attempt::AttemptHistory, question::PublicQuestion, subject::Subject},
    utils::session::Claims,
};

/// Student dashboard: the list of subjects available to quiz on.
/// Student only.
pub async fn student_dashboard(
    State(pool): State<PgPool>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name")
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list subjects: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let (flash, jar) = flash::take(jar);

    Ok((
        jar,
        Json(json!({
            "page": "student_dashboard",
            "flash": flash,
            "subjects": subjects,
        })),
    ))
}

/// Shows the questions of one subject, with the correct answers withheld.
/// Student only.
///
/// A subject with no questions cannot be taken: the caller is sent back to
/// the dashboard with a warning and nothing is recorded.
pub async fn take_quiz(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i64>,
) -> Result<Response, AppError> {
    let subject = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects WHERE id = $1")
        .bind(subject_id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Quiz subject not found.".to_string()))?;

    let questions = sqlx::query_as::<_, PublicQuestion>(
        r#"
        SELECT id, question_text, option1, option2, option3, option4
        FROM questions
        WHERE subject_id = $1
        ORDER BY id
        "#,
    )
    .bind(subject_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if questions.is_empty() {
        let jar = flash::set(
            CookieJar::default(),
            "warning",
            "No questions available for this subject yet.",
        );
        return Ok((jar, Redirect::to("/student_dashboard")).into_response());
    }

    Ok(Json(json!({
        "page": "quiz",
        "subject": subject,
        "questions": questions,
    }))
    .into_response())
}

/// Extracts `question_<id>` form fields into an answer map.
/// Unrelated fields are ignored, as are malformed question ids.
fn collect_answers(form: &HashMap<String, String>) -> HashMap<i64, String> {
    form.iter()
        .filter_map(|(key, value)| {
            let id = key.strip_prefix("question_")?.parse().ok()?;
            Some((id, value.clone()))
        })
        .collect()
}

/// Grades a submitted quiz and appends one immutable attempt row.
/// Student only.
///
/// The answer key defines `total_questions`; unanswered questions count as
/// incorrect. A store failure while recording surfaces as a notice and the
/// attempt is simply dropped.
pub async fn submit_quiz(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i64>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let answer_key = sqlx::query_as::<_, AnswerKey>(
        "SELECT id, correct_answer FROM questions WHERE subject_id = $1",
    )
    .bind(subject_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch answer key: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let submitted = collect_answers(&form);
    let result = grading::grade(&answer_key, &submitted);

    sqlx::query(
        r#"
        INSERT INTO quiz_attempts (user_id, subject_id, score, total_questions)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(claims.user_id())
    .bind(subject_id)
    .bind(result.score)
    .bind(result.total_questions)
    .execute(&pool)
    .await
    .map_err(|e| {
        if crate::error::is_foreign_key_violation(&e) {
            AppError::NotFound("Quiz subject not found.".to_string())
        } else {
            tracing::error!("Failed to record quiz attempt: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    let jar = flash::set(
        CookieJar::default(),
        "info",
        &format!(
            "Quiz Submitted! Your score is {}/{}.",
            result.score, result.total_questions
        ),
    );
    Ok((jar, Redirect::to("/my_results")))
}

/// The caller's own attempt history, most recent first. Student only.
pub async fn my_results(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let attempts = sqlx::query_as::<_, AttemptHistory>(
        r#"
        SELECT s.name AS subject_name, qa.score, qa.total_questions, qa.attempt_date
        FROM quiz_attempts qa
        JOIN subjects s ON qa.subject_id = s.id
        WHERE qa.user_id = $1
        ORDER BY qa.attempt_date DESC
        "#,
    )
    .bind(claims.user_id())
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let (flash, jar) = flash::take(jar);

    Ok((
        jar,
        Json(json!({
            "page": "my_results",
            "flash": flash,
            "attempts": attempts,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_answers_keeps_only_question_fields() {
        let mut form = HashMap::new();
        form.insert("question_12".to_string(), "3".to_string());
        form.insert("question_7".to_string(), "1".to_string());
        form.insert("csrf_token".to_string(), "abc".to_string());
        form.insert("question_x".to_string(), "2".to_string());

        let answers = collect_answers(&form);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(&12).map(String::as_str), Some("3"));
        assert_eq!(answers.get(&7).map(String::as_str), Some("1"));
    }

    #[test]
    fn collect_answers_empty_form() {
        assert!(collect_answers(&HashMap::new()).is_empty());
    }
}
