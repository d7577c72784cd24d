// src/handlers/admin.rs

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::{AppError, is_foreign_key_violation, is_unique_violation},
    flash,
    models::{
        question::{AddQuestionForm, QuestionSummary},
        subject::{AddSubjectForm, Subject},
    },
};

/// Admin dashboard: all subjects plus all questions with their subject
/// name. Admin only.
pub async fn admin_dashboard(
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

    let questions = sqlx::query_as::<_, QuestionSummary>(
        r#"
        SELECT q.id, q.question_text, s.name AS subject_name
        FROM questions q
        JOIN subjects s ON q.subject_id = s.id
        ORDER BY s.name, q.id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let (flash, jar) = flash::take(jar);

    Ok((
        jar,
        Json(json!({
            "page": "admin_dashboard",
            "flash": flash,
            "subjects": subjects,
            "questions": questions,
        })),
    ))
}

/// Adds a new quiz subject. Admin only.
///
/// The name is trimmed and must be non-empty; uniqueness is enforced solely
/// by the store's constraint, so two racing inserts cannot both land.
pub async fn add_subject(
    State(pool): State<PgPool>,
    jar: CookieJar,
    Form(payload): Form<AddSubjectForm>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.subject_name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Subject name cannot be empty.".to_string()));
    }

    sqlx::query("INSERT INTO subjects (name) VALUES ($1)")
        .bind(name)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("This subject already exists.".to_string())
            } else {
                tracing::error!("Failed to add subject: {:?}", e);
                AppError::from(e)
            }
        })?;

    let jar = flash::set(jar, "success", "Subject added successfully!");
    Ok((jar, Redirect::to("/admin_dashboard")))
}

/// Adds a new question under a subject. Admin only.
///
/// All fields are presence-checked and the correct option index must be
/// 1-4. An unknown subject surfaces through the foreign key constraint.
pub async fn add_question(
    State(pool): State<PgPool>,
    jar: CookieJar,
    Form(payload): Form<AddQuestionForm>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO questions
        (subject_id, question_text, option1, option2, option3, option4, correct_answer)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(payload.subject_id)
    .bind(&payload.question_text)
    .bind(&payload.option1)
    .bind(&payload.option2)
    .bind(&payload.option3)
    .bind(&payload.option4)
    .bind(payload.correct_answer)
    .execute(&pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::NotFound("Quiz subject not found.".to_string())
        } else {
            tracing::error!("Failed to add question: {:?}", e);
            AppError::from(e)
        }
    })?;

    let jar = flash::set(jar, "success", "Question added successfully!");
    Ok((jar, Redirect::to("/admin_dashboard")))
}
