use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::models::Catalog;
use crate::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Store,
    pub catalog: Catalog,
    pub config: Config,
    pub login_limiter: LoginRateLimiter,
}
