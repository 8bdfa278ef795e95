pub mod assets;
pub mod auth;
pub mod board;
pub mod home;
pub mod posts;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// The full application: JSON API, admin auth and the rendered board.
pub fn app(state: AppState) -> Router {
    let cors = state.config.server.cors;

    let mut app = Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/board", get(board::board_page))
        .route("/assets/{*path}", get(assets::serve))
        .merge(auth::router())
        .merge(posts::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}
