use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::routes::home::Html;
use crate::state::AppState;

// -- Templates --

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub title: String,
}

// -- Request / response types --

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub token: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub ok: bool,
    pub user: String,
}

// -- Handlers --

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> Html<LoginTemplate> {
    Html(LoginTemplate {
        title: state.config.board.title.clone(),
    })
}

/// POST /auth/login: exchange the admin credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Ok(Json(LoginRequest { username, password })) = body else {
        tracing::warn!("Rejected admin login with unreadable body");
        return Err(AppError::InvalidCredentials);
    };
    let credentials = state.credentials.clone();

    let accepted =
        tokio::task::spawn_blocking(move || credentials.verify(&username, &password)).await?;
    if !accepted {
        tracing::warn!("Rejected admin login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.lock().await.issue();
    tracing::info!("Issued admin session");

    Ok(Json(LoginResponse { ok: true, token }))
}

/// GET /admin/me
pub async fn me(admin: AdminUser) -> Json<MeResponse> {
    Json(MeResponse {
        ok: true,
        user: admin.username,
    })
}
