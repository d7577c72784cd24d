// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Insecure development defaults. Every value here must be overridden
/// through the environment before the app faces real users.
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_USER: &str = "quiz_dev";
const DEFAULT_DB_PASSWORD: &str = "quiz_dev_password";
const DEFAULT_DB_NAME: &str = "quiz_system";
const DEFAULT_SECRET_KEY: &str = "default_dev_secret_key";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,

    /// Secret used to sign session tokens.
    pub secret_key: String,

    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,

    pub rust_log: String,

    /// Optional credentials for seeding the admin account at startup.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| DEFAULT_DB_USER.to_string());
        let db_password =
            env::var("DB_PASSWORD").unwrap_or_else(|_| DEFAULT_DB_PASSWORD.to_string());
        let db_name = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using insecure development default");
            DEFAULT_SECRET_KEY.to_string()
        });

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let admin_username = env::var("ADMIN_USERNAME").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        Self {
            db_host,
            db_user,
            db_password,
            db_name,
            secret_key,
            session_ttl_secs,
            rust_log,
            admin_username,
            admin_password,
        }
    }

    /// Connection URL composed from the individual DB_* variables.
    /// `DATABASE_URL`, if set, wins outright.
    pub fn database_url(&self) -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }
        format!(
            "postgres://{}:{}@{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_name
        )
    }
}
