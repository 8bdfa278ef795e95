use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub caption: String,
    pub thumbnail: String,
    pub url: String,
}

/// The writable fields of a post, as accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub username: String,
    pub caption: String,
    pub thumbnail: String,
    pub url: String,
}

impl NewPost {
    pub fn with_id(self, id: i64) -> Post {
        Post {
            id,
            username: self.username,
            caption: self.caption,
            thumbnail: self.thumbnail,
            url: self.url,
        }
    }
}

/// What the card grid renders for a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub image_url: String,
    pub caption: String,
    pub alt_text: String,
    pub url: String,
}

impl From<Post> for Card {
    fn from(post: Post) -> Self {
        Card {
            id: post.id,
            image_url: post.thumbnail,
            alt_text: post.caption.clone(),
            caption: post.caption,
            url: post.url,
        }
    }
}
