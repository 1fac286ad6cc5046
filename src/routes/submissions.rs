use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::db;
use crate::error::AppError;
use crate::models::{NewSubmission, Submission};
use crate::routes::auth::MessageResponse;
use crate::state::SharedState;
use crate::submission::export;

/// Stored as received. Completeness and clash checks happen on the client.
pub async fn submit(
    State(state): State<SharedState>,
    Json(form): Json<NewSubmission>,
) -> Result<Json<MessageResponse>, AppError> {
    let stored = db::submissions::append(&state.store, form).await?;

    tracing::info!(
        courses = stored.selected_courses.len(),
        submitted_at = %stored.submitted_at,
        "Survey submitted"
    );

    Ok(Json(MessageResponse {
        message: "Form submitted successfully!".to_string(),
    }))
}

/// Oldest first, exactly as stored.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Submission>>, AppError> {
    let submissions = db::submissions::list(&state.store).await?;
    Ok(Json(submissions))
}

pub async fn export(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let submissions = db::submissions::list(&state.store).await?;
    let csv = export::export_csv(&submissions, &state.catalog);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        csv,
    ))
}
