// src/utils/session.rs
//
// The session gate. A login binds the user's identity and role into a
// signed, expiring token carried in a cookie; every protected operation
// checks that token at its entry. Role is fixed at login time and never
// changes within a session.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, flash, models::user::Role};

/// Name of the cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "quiz_session";

/// Signed session claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// User ID, stored as a string per JWT convention.
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Expiration as a Unix timestamp.
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub.parse().unwrap_or(0)
    }
}

/// Signs a session token for a freshly authenticated user.
pub fn sign_session(
    id: i64,
    username: &str,
    role: Role,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + ttl_secs as usize;

    let claims = Claims {
        sub: id.to_string(),
        username: username.to_owned(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a session token.
pub fn verify_session(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid session".to_string()))?;

    Ok(token_data.claims)
}

/// Builds the session cookie set at login.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Removes the session cookie, ending the session.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

/// Reads and verifies the caller's session from the request headers.
/// Returns `None` for missing, tampered, or expired sessions.
pub fn current_user(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_owned();
    verify_session(&token, secret).ok()
}

/// A failed gate check is not a hard error: the caller is sent back to the
/// login page with a notice.
fn login_redirect() -> Response {
    let jar = flash::set(
        CookieJar::default(),
        "warning",
        "Please log in to continue.",
    );
    (jar, Redirect::to("/login")).into_response()
}

async fn gate(config: Config, mut req: Request<Body>, next: Next, required: Role) -> Response {
    match current_user(req.headers(), &config.secret_key) {
        Some(claims) if claims.role == required => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        _ => login_redirect(),
    }
}

/// Middleware gating admin-only operations.
pub async fn require_admin(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(config, req, next, Role::Admin).await
}

/// Middleware gating student-only operations.
pub async fn require_student(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Response {
    gate(config, req, next, Role::Student).await
}
