// src/flash.rs

use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;

/// Cookie carrying a one-shot user-visible notice across a redirect.
pub const FLASH_COOKIE: &str = "quiz_flash";

/// A flash-style message shown to the user on the next page they load.
/// Levels follow the usual convention: success, info, warning, danger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

/// Stores a flash message in the jar, replacing any pending one.
pub fn set(jar: CookieJar, level: &str, message: &str) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, format!("{}:{}", level, message)))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Takes the pending flash message out of the jar, if any.
/// Returns the jar with a removal cookie so the message shows only once.
pub fn take(jar: CookieJar) -> (Option<Flash>, CookieJar) {
    let flash = jar.get(FLASH_COOKIE).and_then(|cookie| {
        let (level, message) = cookie.value().split_once(':')?;
        Some(Flash {
            level: level.to_string(),
            message: message.to_string(),
        })
    });

    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (flash, jar)
}
