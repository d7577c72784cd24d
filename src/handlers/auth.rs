// src/handlers/auth.rs

use axum::{
    Form, Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, is_unique_violation},
    flash,
    models::user::{CredentialsForm, Role, User},
    utils::{
        hash::{hash_password, verify_password},
        session,
    },
};

/// Homepage: forwards to the dashboard matching the caller's role, or to
/// the login page for anonymous callers.
pub async fn home(State(config): State<Config>, headers: HeaderMap) -> Redirect {
    match session::current_user(&headers, &config.secret_key) {
        Some(claims) if claims.role == Role::Admin => Redirect::to("/admin_dashboard"),
        Some(_) => Redirect::to("/student_dashboard"),
        None => Redirect::to("/login"),
    }
}

/// Login page. Responds with any pending flash notice.
pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (flash, jar) = flash::take(jar);
    (jar, Json(json!({ "page": "login", "flash": flash })))
}

/// Authenticates a user and establishes a session.
///
/// Verifies the password against the stored Argon2 hash, binds identity and
/// role into a signed session cookie and redirects home. Bad credentials
/// come back as a notice on the login page, never a hard error.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(payload): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::AuthError("Invalid login credentials.".to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user = user.ok_or_else(|| AppError::AuthError("Invalid login credentials.".to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::AuthError("Invalid login credentials.".to_string()));
    }

    // An unknown role tag on the row means the row was edited out-of-band;
    // refuse the login rather than guess a capability.
    let role = Role::parse(&user.role)
        .ok_or_else(|| AppError::AuthError("Invalid login credentials.".to_string()))?;

    let token = session::sign_session(
        user.id,
        &user.username,
        role,
        &config.secret_key,
        config.session_ttl_secs,
    )?;

    let jar = jar.add(session::session_cookie(token));
    let jar = flash::set(jar, "success", "You are now logged in");

    Ok((jar, Redirect::to("/")))
}

/// Registration page. Responds with any pending flash notice.
pub async fn register_page(jar: CookieJar) -> impl IntoResponse {
    let (flash, jar) = flash::take(jar);
    (jar, Json(json!({ "page": "register", "flash": flash })))
}

/// Registers a new student account.
///
/// The username's uniqueness is enforced by the store's constraint, not by
/// a prior existence check; a racing duplicate insert surfaces here as a
/// warning.
pub async fn register(
    State(pool): State<PgPool>,
    jar: CookieJar,
    Form(payload): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, 'student')")
        .bind(&payload.username)
        .bind(&hashed_password)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already exists. Please choose another.".to_string())
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::from(e)
            }
        })?;

    let jar = flash::set(
        jar,
        "success",
        "You have successfully registered! Please log in.",
    );
    Ok((jar, Redirect::to("/login")))
}

/// Ends the session by removing the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = session::clear_session(jar);
    let jar = flash::set(jar, "success", "You have been logged out.");
    (jar, Redirect::to("/login"))
}
