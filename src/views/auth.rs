use askama::Template;
use axum::extract::Query;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::extractor::LOGIN_COOKIE;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    /// Set when a protected page bounced the browser here.
    pub denied: Option<String>,
}

pub async fn login_page(jar: CookieJar, Query(q): Query<LoginQuery>) -> Response {
    // If already logged in, redirect to dashboard
    if jar.get(LOGIN_COOKIE).is_some_and(|c| c.value() == "true") {
        return Redirect::to("/admin").into_response();
    }

    let template = LoginTemplate {
        error: q
            .denied
            .map(|_| "請先登入管理後台。".to_string()),
    };
    Html(template.render().unwrap_or_default()).into_response()
}
