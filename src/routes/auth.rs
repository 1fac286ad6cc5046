use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{extractor, password};
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// No token is issued: success only sets the browser-side login flag.
pub async fn login(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let ip = addr.ip();

    // The right password always gets in; throttling only answers wrong ones.
    if !password::verify(&req.password, &state.config.admin_password) {
        if let Err(retry_after) = state.login_limiter.check(ip) {
            return Err(AppError::RateLimited(format!(
                "Too many login attempts. Try again in {retry_after} seconds."
            )));
        }
        state.login_limiter.record_failure(ip);
        tracing::warn!(%ip, "Failed admin login");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    state.login_limiter.reset(ip);
    tracing::info!(%ip, "Admin logged in");

    Ok((
        extractor::set_flag(jar),
        Json(MessageResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        extractor::clear_flag(jar),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
