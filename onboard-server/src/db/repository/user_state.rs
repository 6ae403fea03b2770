//! Per-user UI State Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::UserState;
use crate::utils::time;

#[derive(Clone)]
pub struct UserStateRepository {
    base: BaseRepository,
}

impl UserStateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Last-write-wins upsert keyed by email
    pub async fn save(&self, email: &str, state: serde_json::Value) -> RepoResult<()> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE user_state SET
                    state = $state,
                    updated_at = $updated_at
                WHERE email = $email
                RETURN AFTER"#,
            )
            .bind(("state", state.clone()))
            .bind(("updated_at", time::now_millis()))
            .bind(("email", email.to_string()))
            .await?;

        let updated: Vec<UserState> = result.take(0)?;
        if !updated.is_empty() {
            return Ok(());
        }

        self.base
            .db()
            .query(
                r#"CREATE user_state SET
                    email = $email,
                    state = $state,
                    updated_at = $updated_at"#,
            )
            .bind(("email", email.to_string()))
            .bind(("state", state))
            .bind(("updated_at", time::now_millis()))
            .await?;
        Ok(())
    }

    pub async fn get(&self, email: &str) -> RepoResult<Option<serde_json::Value>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user_state WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let states: Vec<UserState> = result.take(0)?;
        Ok(states.into_iter().next().map(|s| s.state))
    }
}
