use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::models::{Card, NewPost, Post};
use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::state::AppState;

const MISSING_FIELDS: &str = "All parameters are required";
const POST_NOT_FOUND: &str = "Post not found";

// --- Request bodies ---

/// Incoming post fields. Every field is optional here so that a missing one
/// becomes a 400 with our own message instead of a deserialization rejection.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PostFields {
    pub username: Option<String>,
    pub caption: Option<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
}

impl PostFields {
    /// Presence check only: values are kept verbatim.
    pub fn validate(self) -> AppResult<NewPost> {
        fn required(value: Option<String>) -> AppResult<String> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.into()))
        }

        Ok(NewPost {
            username: required(self.username)?,
            caption: required(self.caption)?,
            thumbnail: required(self.thumbnail)?,
            url: required(self.url)?,
        })
    }
}

/// An unreadable body (wrong content type, bad JSON, wrong field types) is
/// answered like an empty one.
fn read_fields(body: Result<Json<PostFields>, JsonRejection>) -> AppResult<NewPost> {
    match body {
        Ok(Json(fields)) => fields.validate(),
        Err(rejection) => {
            tracing::debug!("Rejected post body: {}", rejection);
            Err(AppError::BadRequest(MISSING_FIELDS.into()))
        }
    }
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/cards", get(list_cards))
}

// --- Handlers ---

/// Ids that are not integers can never match a row.
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::NotFound(POST_NOT_FOUND.into()))
}

async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    let posts = state.posts.list().await?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Post>> {
    let id = parse_id(&id)?;
    let post = state
        .posts
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.into()))?;
    Ok(Json(post))
}

async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<PostFields>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let new_post = read_fields(body)?;
    let id = state.posts.create(&new_post).await?;
    Ok((StatusCode::CREATED, Json(new_post.with_id(id))))
}

async fn update_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    body: Result<Json<PostFields>, JsonRejection>,
) -> AppResult<Json<Post>> {
    let id = parse_id(&id)?;
    let new_post = read_fields(body)?;

    if state.posts.update(id, &new_post).await? == 0 {
        return Err(AppError::NotFound(POST_NOT_FOUND.into()));
    }
    Ok(Json(new_post.with_id(id)))
}

async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;

    if state.posts.delete(id).await? == 0 {
        return Err(AppError::NotFound(POST_NOT_FOUND.into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_cards(State(state): State<AppState>) -> AppResult<Json<Vec<Card>>> {
    let cards = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(Card::from)
        .collect();
    Ok(Json(cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PostFields {
        PostFields {
            username: Some("alice".into()),
            caption: Some("hi".into()),
            thumbnail: Some("t.png".into()),
            url: Some("http://x".into()),
        }
    }

    #[test]
    fn complete_fields_validate() {
        let post = full().validate().unwrap();
        assert_eq!(post.username, "alice");
        assert_eq!(post.url, "http://x");
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let cases: [fn(&mut PostFields); 4] = [
            |f| f.username = None,
            |f| f.caption = None,
            |f| f.thumbnail = None,
            |f| f.url = None,
        ];
        for clear in cases {
            let mut fields = full();
            clear(&mut fields);
            assert!(matches!(fields.validate(), Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut fields = full();
        fields.caption = Some(String::new());
        assert!(matches!(fields.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let mut fields = full();
        fields.caption = Some("  spaced  ".into());
        assert_eq!(fields.validate().unwrap().caption, "  spaced  ");
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert_eq!(parse_id("12").unwrap(), 12);
    }
}
