//! User Repository

use shared::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use crate::utils::time;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user, hashing the supplied password
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        self.create_with_hash(&data.email, &password_hash, data.role)
            .await
    }

    /// Create a new user from an already-hashed password.
    ///
    /// Signup-request approval stores the hash at request time and must not
    /// re-hash it.
    pub async fn create_with_hash(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    password_hash = $password_hash,
                    role = $role,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", email.to_string()))
            .bind(("password_hash", password_hash.to_string()))
            .bind(("role", role))
            .bind(("created_at", time::now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Look up by email and verify the password.
    ///
    /// Returns None for unknown email AND for a wrong password - callers
    /// must not be able to tell the two apart.
    pub async fn verify(&self, email: &str, password: &str) -> RepoResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let valid = user
            .verify_password(password)
            .map_err(|e| RepoError::Database(format!("Password verification failed: {}", e)))?;

        Ok(valid.then_some(user))
    }

    /// Hard delete a user account.
    ///
    /// Trainer accounts only; an IT Manager account cannot be deleted here,
    /// so the last privileged account can never vanish.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let existing: Option<User> = self.base.db().select(thing.clone()).await?;
        let Some(existing) = existing else {
            return Ok(false);
        };

        if existing.role == Role::ItManager {
            return Err(RepoError::Validation(
                "Cannot delete an IT Manager account".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// All trainer accounts, oldest first
    pub async fn find_trainers(&self) -> RepoResult<Vec<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = $role ORDER BY created_at")
            .bind(("role", Role::Trainer))
            .await?;
        let trainers: Vec<User> = result.take(0)?;
        Ok(trainers)
    }

    /// Change the role recorded for an email; false when no account matched
    pub async fn update_role(&self, email: &str, role: Role) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("UPDATE user SET role = $role WHERE email = $email RETURN AFTER")
            .bind(("role", role))
            .bind(("email", email.to_string()))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        Ok(!updated.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_db;

    fn create_payload(email: &str, role: Role) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn create_and_verify_round_trip() {
        let repo = UserRepository::new(test_db().await);
        let user = repo
            .create(create_payload("ana@example.edu", Role::Trainer))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@example.edu");
        assert!(user.id.is_some());

        let verified = repo
            .verify("ana@example.edu", "hunter2hunter2")
            .await
            .unwrap();
        assert!(verified.is_some());
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let repo = UserRepository::new(test_db().await);
        repo.create(create_payload("dup@example.edu", Role::Trainer))
            .await
            .unwrap();

        let err = repo
            .create(create_payload("dup@example.edu", Role::ItManager))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let repo = UserRepository::new(test_db().await);
        repo.create(create_payload("known@example.edu", Role::Trainer))
            .await
            .unwrap();

        let wrong_password = repo.verify("known@example.edu", "bad-password").await.unwrap();
        let unknown_email = repo.verify("ghost@example.edu", "bad-password").await.unwrap();

        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
    }

    #[tokio::test]
    async fn delete_refuses_it_manager_accounts() {
        let repo = UserRepository::new(test_db().await);
        let manager = repo
            .create(create_payload("boss@example.edu", Role::ItManager))
            .await
            .unwrap();

        let err = repo
            .delete(&manager.id.unwrap().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(repo.find_by_email("boss@example.edu").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_trainer_and_missing_account() {
        let repo = UserRepository::new(test_db().await);
        let trainer = repo
            .create(create_payload("t@example.edu", Role::Trainer))
            .await
            .unwrap();
        let id = trainer.id.unwrap().to_string();

        assert!(repo.delete(&id).await.unwrap());
        // Second delete is a no-op failure signal, not an error
        assert!(!repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn trainer_listing_and_role_update() {
        let repo = UserRepository::new(test_db().await);
        repo.create(create_payload("a@example.edu", Role::Trainer))
            .await
            .unwrap();
        repo.create(create_payload("b@example.edu", Role::ItManager))
            .await
            .unwrap();

        let trainers = repo.find_trainers().await.unwrap();
        assert_eq!(trainers.len(), 1);
        assert_eq!(trainers[0].email, "a@example.edu");

        assert!(repo.update_role("a@example.edu", Role::ItManager).await.unwrap());
        assert!(repo.find_trainers().await.unwrap().is_empty());
        assert!(!repo.update_role("ghost@example.edu", Role::Trainer).await.unwrap());
    }
}
