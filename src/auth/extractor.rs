use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::state::SharedState;

pub const LOGIN_COOKIE: &str = "logged_in";

/// Presence of the client-side login flag.
///
/// The flag is not a credential: the server only checks that the browser
/// carries it, the same as a value kept in local storage.
#[derive(Debug, Clone, Copy)]
pub struct LoginFlag;

pub fn set_flag(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((LOGIN_COOKIE, "true"))
        .path("/")
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

pub fn clear_flag(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(LOGIN_COOKIE).path("/"))
}

impl FromRequestParts<SharedState> for LoginFlag {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(LOGIN_COOKIE) {
            Some(cookie) if cookie.value() == "true" => Ok(LoginFlag),
            _ => Err(AppError::Unauthorized("Login required".to_string())),
        }
    }
}
