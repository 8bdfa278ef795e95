use axum::routing::{get, post};
use axum::Router;

use crate::auth::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::login_page))
        .route("/auth/login", post(handlers::login))
        .route("/admin/me", get(handlers::me))
}
