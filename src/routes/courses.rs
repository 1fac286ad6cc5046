use axum::extract::State;
use axum::Json;

use crate::models::Catalog;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Json<Catalog> {
    Json(state.catalog.clone())
}
