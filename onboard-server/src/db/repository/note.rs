//! Note Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Note, NoteCreate, NoteUpdate};
use crate::utils::time;

#[derive(Clone)]
pub struct NoteRepository {
    base: BaseRepository,
}

impl NoteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, author: &str, data: NoteCreate) -> RepoResult<Note> {
        if data.title.trim().is_empty() || data.content.trim().is_empty() {
            return Err(RepoError::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE note SET
                    author = $author,
                    title = $title,
                    topic = $topic,
                    content = $content,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("author", author.to_string()))
            .bind(("title", data.title))
            .bind(("topic", data.topic))
            .bind(("content", data.content))
            .bind(("created_at", time::now_millis()))
            .await?;

        let created: Option<Note> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create note".to_string()))
    }

    /// All notes, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Note>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM note ORDER BY created_at DESC")
            .await?;
        let notes: Vec<Note> = result.take(0)?;
        Ok(notes)
    }

    /// Any authenticated user may update any note
    pub async fn update(&self, id: &str, data: NoteUpdate) -> RepoResult<Note> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    title = $title,
                    topic = $topic,
                    content = $content,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("title", data.title))
            .bind(("topic", data.topic))
            .bind(("content", data.content))
            .bind(("updated_at", time::now_millis()))
            .await?;

        result
            .take::<Option<Note>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Note {} not found", id)))
    }

    /// Any authenticated user may delete any note
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let existing: Option<Note> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Ok(false);
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
