// Data access for the posts table
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use thiserror::Error;

use crate::db::models::{NewPost, Post};
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post, returning the new row id
    async fn create(&self, post: &NewPost) -> Result<i64, RepositoryError>;

    async fn list(&self) -> Result<Vec<Post>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<Option<Post>, RepositoryError>;

    /// Overwrite all fields of a post, returning the number of rows changed
    async fn update(&self, id: i64, post: &NewPost) -> Result<usize, RepositoryError>;

    /// Returns the number of rows changed
    async fn delete(&self, id: i64) -> Result<usize, RepositoryError>;
}

/// SQLite implementation
pub struct SqlitePostRepository {
    pool: DbPool,
}

impl SqlitePostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        username: row.get(1)?,
        caption: row.get(2)?,
        thumbnail: row.get(3)?,
        url: row.get(4)?,
    })
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: &NewPost) -> Result<i64, RepositoryError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO posts (username, caption, thumbnail, url) VALUES (?1, ?2, ?3, ?4)",
            params![post.username, post.caption, post.thumbnail, post.url],
        )?;
        let id = conn.last_insert_rowid();

        tracing::info!("Created post with id {}", id);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, username, caption, thumbnail, url FROM posts ORDER BY id")?;
        let posts = stmt
            .query_map([], post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, RepositoryError> {
        let conn = self.pool.get()?;

        let post = conn
            .query_row(
                "SELECT id, username, caption, thumbnail, url FROM posts WHERE id = ?1",
                params![id],
                post_from_row,
            )
            .optional()?;

        Ok(post)
    }

    async fn update(&self, id: i64, post: &NewPost) -> Result<usize, RepositoryError> {
        let conn = self.pool.get()?;

        let changes = conn.execute(
            "UPDATE posts SET username = ?1, caption = ?2, thumbnail = ?3, url = ?4 WHERE id = ?5",
            params![post.username, post.caption, post.thumbnail, post.url, id],
        )?;

        if changes == 0 {
            tracing::warn!("No post found with id {}, nothing updated", id);
        } else {
            tracing::info!("Updated post with id {}", id);
        }
        Ok(changes)
    }

    async fn delete(&self, id: i64) -> Result<usize, RepositoryError> {
        let conn = self.pool.get()?;

        let changes = conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;

        if changes == 0 {
            tracing::warn!("No post found with id {}, nothing deleted", id);
        } else {
            tracing::info!("Deleted post with id {}", id);
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use tempfile::TempDir;

    fn create_test_repo() -> (SqlitePostRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = db::create_pool(&db_path).unwrap();
        db::init_schema(&pool).unwrap();

        (SqlitePostRepository::new(pool), temp_dir)
    }

    fn new_post(username: &str, caption: &str) -> NewPost {
        NewPost {
            username: username.to_string(),
            caption: caption.to_string(),
            thumbnail: "t.png".to_string(),
            url: "http://x".to_string(),
        }
    }

    #[tokio::test]
    async fn create_returns_increasing_ids() {
        let (repo, _temp) = create_test_repo();

        let first = repo.create(&new_post("alice", "hi")).await.unwrap();
        let second = repo.create(&new_post("bob", "yo")).await.unwrap();

        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[tokio::test]
    async fn get_returns_stored_fields() {
        let (repo, _temp) = create_test_repo();

        let id = repo.create(&new_post("alice", "hi")).await.unwrap();
        let post = repo.get(id).await.unwrap().unwrap();

        assert_eq!(post, new_post("alice", "hi").with_id(id));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let (repo, _temp) = create_test_repo();
        assert!(repo.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_all_in_id_order() {
        let (repo, _temp) = create_test_repo();
        assert!(repo.list().await.unwrap().is_empty());

        for caption in ["one", "two", "three"] {
            repo.create(&new_post("alice", caption)).await.unwrap();
        }

        let captions: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.caption)
            .collect();
        assert_eq!(captions, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (repo, _temp) = create_test_repo();
        let id = repo.create(&new_post("alice", "hi")).await.unwrap();

        let changes = repo.update(id, &new_post("alice", "edited")).await.unwrap();
        assert_eq!(changes, 1);
        assert_eq!(repo.get(id).await.unwrap().unwrap().caption, "edited");
    }

    #[tokio::test]
    async fn update_missing_changes_nothing() {
        let (repo, _temp) = create_test_repo();
        assert_eq!(repo.update(9, &new_post("a", "b")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_row_once() {
        let (repo, _temp) = create_test_repo();
        let id = repo.create(&new_post("alice", "hi")).await.unwrap();

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
        assert!(repo.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (repo, _temp) = create_test_repo();
        let id = repo.create(&new_post("alice", "hi")).await.unwrap();
        repo.delete(id).await.unwrap();

        let next = repo.create(&new_post("alice", "again")).await.unwrap();
        assert!(next > id);
    }
}
