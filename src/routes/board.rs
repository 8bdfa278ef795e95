use askama::Template;
use axum::extract::State;

use crate::db::models::Card;
use crate::error::AppResult;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub cards: Vec<Card>,
}

/// GET /board: every post as a card
pub async fn board_page(State(state): State<AppState>) -> AppResult<Html<BoardTemplate>> {
    let cards = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(Card::from)
        .collect();

    Ok(Html(BoardTemplate {
        title: state.config.board.title.clone(),
        cards,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, caption: &str) -> Card {
        Card {
            id,
            image_url: format!("/img/{}.png", id),
            caption: caption.to_string(),
            alt_text: caption.to_string(),
            url: format!("https://example.com/{}", id),
        }
    }

    #[test]
    fn renders_one_card_per_post() {
        let html = BoardTemplate {
            title: "PAA Pages".into(),
            cards: vec![card(1, "first"), card(2, "second")],
        }
        .render()
        .unwrap();

        assert!(html.contains("PAA Pages"));
        assert_eq!(html.matches("class=\"card\"").count(), 2);
        assert!(html.contains("2.png"));
        assert!(html.contains("loading=\"lazy\""));
    }

    #[test]
    fn escapes_captions() {
        let html = BoardTemplate {
            title: "t".into(),
            cards: vec![card(1, "<script>")],
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_board_shows_placeholder() {
        let html = BoardTemplate {
            title: "t".into(),
            cards: vec![],
        }
        .render()
        .unwrap();

        assert!(html.contains("No posts yet"));
    }
}
