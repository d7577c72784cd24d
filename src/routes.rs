// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, quiz},
    state::AppState,
    utils::session::{require_admin, require_student},
};

/// Assembles the main application router.
///
/// * Public routes: home redirect, login, register, logout.
/// * Admin routes behind the admin session gate.
/// * Student routes behind the student session gate.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    let public_routes = Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout));

    let admin_routes = Router::new()
        .route("/admin_dashboard", get(admin::admin_dashboard))
        .route("/add_subject", post(admin::add_subject))
        .route("/add_question", post(admin::add_question))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let student_routes = Router::new()
        .route("/student_dashboard", get(quiz::student_dashboard))
        .route("/take_quiz/{subject_id}", get(quiz::take_quiz))
        .route("/submit_quiz/{subject_id}", post(quiz::submit_quiz))
        .route("/my_results", get(quiz::my_results))
        .layer(middleware::from_fn_with_state(state.clone(), require_student));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(student_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
