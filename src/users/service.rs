//! User business logic.

use async_trait::async_trait;

use super::entity::User;
use super::error::ServiceError;
use super::repository::UserRepository;

/// CRUD operations over users.
#[async_trait]
pub trait UserOperations: Send + Sync {
    /// Echo that `username` performed an action.
    async fn perform_action(&self, username: &str) -> Result<String, ServiceError>;

    async fn create_user(&self, user: User) -> Result<User, ServiceError>;

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, ServiceError>;

    /// Overwrite the username, email and password of an existing user.
    ///
    /// Fails with [`ServiceError::NotFound`] if `id` does not exist.
    async fn update_user(&self, id: i64, details: User) -> Result<User, ServiceError>;

    async fn delete_user(&self, id: i64) -> Result<(), ServiceError>;
}

/// Repository-backed implementation of [`UserOperations`].
#[derive(Debug, Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    #[must_use]
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    #[must_use]
    pub fn repository(&self) -> &UserRepository {
        &self.repository
    }
}

#[async_trait]
impl UserOperations for UserService {
    async fn perform_action(&self, username: &str) -> Result<String, ServiceError> {
        Ok(format!("User {username} performed an action."))
    }

    async fn create_user(&self, user: User) -> Result<User, ServiceError> {
        Ok(self.repository.save(user).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.repository.find_all().await?)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, ServiceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn update_user(&self, id: i64, details: User) -> Result<User, ServiceError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        user.username = details.username;
        user.email = details.email;
        user.password = details.password;
        Ok(self.repository.save(user).await?)
    }

    async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.repository.delete_by_id(id).await?)
    }
}
