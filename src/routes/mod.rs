pub mod auth;
pub mod courses;
pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/login", post(auth::login))
        .route("/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        // Submissions
        .route("/api/submit", post(submissions::submit))
        .route("/submit", post(submissions::submit))
        .route("/api/submissions", get(submissions::list))
        .route("/submissions", get(submissions::list))
        .route("/api/submissions/export", get(submissions::export))
        // Catalog
        .route("/api/courses", get(courses::list))
}
