//! Signup Request Repository

use shared::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::user::UserRepository;
use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{SignupRequest, SignupStatus, User};
use crate::utils::time;

#[derive(Clone)]
pub struct SignupRequestRepository {
    base: BaseRepository,
}

impl SignupRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Queue a self-registration; the password is hashed at request time
    pub async fn create(&self, email: &str, password: &str, role: Role) -> RepoResult<SignupRequest> {
        let password_hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE signup_request SET
                    email = $email,
                    password_hash = $password_hash,
                    role = $role,
                    status = $status,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("email", email.to_string()))
            .bind(("password_hash", password_hash))
            .bind(("role", role))
            .bind(("status", SignupStatus::Pending))
            .bind(("created_at", time::now_millis()))
            .await?;

        let created: Option<SignupRequest> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create signup request".to_string()))
    }

    /// Find signup request by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SignupRequest>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let request: Option<SignupRequest> = self.base.db().select(thing).await?;
        Ok(request)
    }

    /// Requests still awaiting a decision, oldest first
    pub async fn find_pending(&self) -> RepoResult<Vec<SignupRequest>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM signup_request WHERE status = $status ORDER BY created_at")
            .bind(("status", SignupStatus::Pending))
            .await?;
        let pending: Vec<SignupRequest> = result.take(0)?;
        Ok(pending)
    }

    /// Approve a pending request: create the account with the stored hash,
    /// then settle the request.
    ///
    /// Guarded by a status check so approving a settled request is an
    /// explicit conflict and can never create a second account.
    pub async fn approve(&self, id: &str, users: &UserRepository) -> RepoResult<User> {
        let request = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Signup request {} not found", id)))?;

        if request.status != SignupStatus::Pending {
            return Err(RepoError::Conflict(format!(
                "Signup request {} already {}",
                id,
                request.status.as_str()
            )));
        }

        let user = users
            .create_with_hash(&request.email, &request.password_hash, request.role)
            .await?;

        self.settle(id, SignupStatus::Approved).await?;
        Ok(user)
    }

    /// Deny a pending request
    pub async fn deny(&self, id: &str) -> RepoResult<()> {
        let request = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Signup request {} not found", id)))?;

        if request.status != SignupStatus::Pending {
            return Err(RepoError::Conflict(format!(
                "Signup request {} already {}",
                id,
                request.status.as_str()
            )));
        }

        self.settle(id, SignupStatus::Denied).await?;
        Ok(())
    }

    async fn settle(&self, id: &str, status: SignupStatus) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_db;

    #[tokio::test]
    async fn approval_creates_user_with_stored_hash() {
        let db = test_db().await;
        let requests = SignupRequestRepository::new(db.clone());
        let users = UserRepository::new(db);

        let request = requests
            .create("new.trainer@example.edu", "trainer-pass", Role::Trainer)
            .await
            .unwrap();
        let id = request.id.unwrap().to_string();

        let user = requests.approve(&id, &users).await.unwrap();
        assert_eq!(user.email, "new.trainer@example.edu");
        assert_eq!(user.role, Role::Trainer);

        // The stored hash must verify against the original password
        let verified = users
            .verify("new.trainer@example.edu", "trainer-pass")
            .await
            .unwrap();
        assert!(verified.is_some());
    }

    #[tokio::test]
    async fn second_approval_creates_no_second_user() {
        let db = test_db().await;
        let requests = SignupRequestRepository::new(db.clone());
        let users = UserRepository::new(db.clone());

        let request = requests
            .create("once@example.edu", "trainer-pass", Role::Trainer)
            .await
            .unwrap();
        let id = request.id.unwrap().to_string();

        requests.approve(&id, &users).await.unwrap();
        let err = requests.approve(&id, &users).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));

        let mut result = db
            .query("SELECT count() FROM user WHERE email = $email GROUP ALL")
            .bind(("email", "once@example.edu".to_string()))
            .await
            .unwrap();
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }
        let rows: Vec<CountRow> = result.take(0).unwrap();
        assert_eq!(rows.first().map(|r| r.count).unwrap_or(0), 1);
    }

    #[tokio::test]
    async fn deny_settles_request_without_creating_user() {
        let db = test_db().await;
        let requests = SignupRequestRepository::new(db.clone());
        let users = UserRepository::new(db);

        let request = requests
            .create("denied@example.edu", "trainer-pass", Role::Trainer)
            .await
            .unwrap();
        let id = request.id.unwrap().to_string();

        requests.deny(&id).await.unwrap();
        assert!(requests.find_pending().await.unwrap().is_empty());
        assert!(users.find_by_email("denied@example.edu").await.unwrap().is_none());

        // Settled requests are settled for good
        let err = requests.approve(&id, &users).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let db = test_db().await;
        let requests = SignupRequestRepository::new(db.clone());
        let users = UserRepository::new(db);

        let err = requests
            .approve("signup_request:missing", &users)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
