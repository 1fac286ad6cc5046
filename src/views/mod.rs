pub mod auth;
pub mod dashboard;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/admin/login", get(auth::login_page))
        .route("/admin", get(dashboard::index))
}
