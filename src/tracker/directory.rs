use uuid::Uuid;

use crate::db::{Store, models::User, repo};
use crate::error::AppError;
use crate::tracker::InputPolicy;

/// Creates and resolves users.
#[derive(Clone)]
pub struct UserDirectory {
    store: Store,
    policy: InputPolicy,
}

impl UserDirectory {
    pub fn new(store: Store, policy: InputPolicy) -> Self {
        Self { store, policy }
    }

    /// Usernames are not unique. A missing username is stored empty unless
    /// the policy is strict.
    pub async fn create(&self, username: Option<String>) -> Result<User, AppError> {
        let username = username.unwrap_or_default();
        if self.policy == InputPolicy::Strict && username.trim().is_empty() {
            return Err(AppError::InvalidInput("username is required".to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
        };
        repo::insert_user(self.store.pool(), &user).await?;

        tracing::info!(user_id = %user.id, "created user");
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(repo::list_users(self.store.pool()).await?)
    }

    /// Ids that are not UUIDs cannot exist, so they resolve to `None` without
    /// a store round trip.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            tracing::debug!(id, "malformed user id");
            return Ok(None);
        };

        Ok(repo::find_user(self.store.pool(), &id.to_string()).await?)
    }

    pub async fn require(&self, id: &str) -> Result<User, AppError> {
        self.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn directory(policy: InputPolicy) -> UserDirectory {
        let store = Store::open("sqlite::memory:", 1).await.unwrap();
        UserDirectory::new(store, policy)
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let dir = directory(InputPolicy::Lenient).await;
        let user = dir.create(Some("ada".into())).await.unwrap();

        let found = dir.find_by_id(&user.id).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_usernames_allowed() {
        let dir = directory(InputPolicy::Lenient).await;
        let first = dir.create(Some("ada".into())).await.unwrap();
        let second = dir.create(Some("ada".into())).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(dir.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_username_policy() {
        let lenient = directory(InputPolicy::Lenient).await;
        let user = lenient.create(None).await.unwrap();
        assert_eq!(user.username, "");

        let strict = directory(InputPolicy::Strict).await;
        let err = strict.create(Some("   ".into())).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(strict.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_resolve_to_none() {
        let dir = directory(InputPolicy::Lenient).await;
        assert!(dir.find_by_id("doesnotexist").await.unwrap().is_none());
        assert!(dir.find_by_id(&Uuid::new_v4().to_string()).await.unwrap().is_none());
        assert!(matches!(dir.require("doesnotexist").await, Err(AppError::UserNotFound)));
    }
}
