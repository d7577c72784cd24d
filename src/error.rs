// src/error.rs

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use std::fmt;

use crate::flash;

/// Global application error enum.
///
/// Every variant is recovered at the boundary of the triggering operation:
/// it becomes a flash message plus a redirect to a safe page, never a hard
/// failure surfaced to the caller.
#[derive(Debug)]
pub enum AppError {
    /// Store unreachable or an unexpected store failure.
    InternalServerError(String),

    /// Validation failure (empty or out-of-range input).
    BadRequest(String),

    /// Missing or invalid credentials/session.
    AuthError(String),

    /// Unknown subject, user, etc.
    NotFound(String),

    /// Constraint violation (duplicate subject/username).
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a flash cookie plus a redirect.
///
/// Auth failures land on the login page; everything else lands on `/`,
/// which forwards to the caller's own dashboard by role.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (level, message, target) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("danger", "Database connection failed.".to_string(), "/")
            }
            AppError::BadRequest(msg) => ("danger", msg, "/"),
            AppError::AuthError(msg) => ("danger", msg, "/login"),
            AppError::NotFound(msg) => ("danger", msg, "/"),
            AppError::Conflict(msg) => ("warning", msg, "/"),
        };

        let jar = flash::set(CookieJar::default(), level, &message);
        (jar, Redirect::to(target)).into_response()
    }
}

/// Allows using the `?` operator on store queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// True when the store rejected a write because of a unique constraint,
/// e.g. a duplicate username or subject name. The constraint is the sole
/// correctness guarantee against racing inserts.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when the store rejected a write because a referenced row does not
/// exist, e.g. adding a question under an unknown subject.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
