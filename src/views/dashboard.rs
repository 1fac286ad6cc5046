use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::LoginFlag;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::export;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    rows: Vec<SubmissionRow>,
}

struct SubmissionRow {
    student_name: String,
    school_grade: String,
    parent_phone: String,
    branch: String,
    diet: String,
    courses: Vec<String>,
    submitted_at: String,
}

pub async fn index(
    _flag: LoginFlag,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = db::submissions::list(&state.store).await?;

    // Newest first.
    let rows = submissions
        .iter()
        .rev()
        .map(|sub| SubmissionRow {
            student_name: sub.student_name.clone(),
            school_grade: sub.school_grade.clone(),
            parent_phone: sub.parent_phone.clone(),
            branch: sub.branch.clone(),
            diet: sub.diet.clone(),
            courses: export::describe_courses(sub, &state.catalog),
            submitted_at: export::format_timestamp(&sub.submitted_at),
        })
        .collect();

    let html = DashboardTemplate { rows }
        .render()
        .map_err(|e| AppError::Internal(format!("Dashboard render failed: {e}")))?;
    Ok(Html(html))
}
