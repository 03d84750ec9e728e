//! Startup seed data.

use super::entity::User;
use super::repository::UserRepository;
use crate::db::StoreError;

/// `(username, email, password)` rows loaded into an empty database.
pub const SEED_USERS: [(&str, &str, &str); 5] = [
    ("Ahmed", "ahmed@example.com", "password1"),
    ("Fatima", "fatima@example.com", "password2"),
    ("Mohamed", "mohamed@example.com", "password3"),
    ("Sara", "sara@example.com", "password4"),
    ("Youssef", "youssef@example.com", "password5"),
];

/// Insert [`SEED_USERS`] directly through the repository if no users exist.
///
/// Seeding bypasses the service layer, so it is never audited. Returns the
/// number of users inserted.
///
/// # Errors
///
/// Returns an error if the repository fails.
pub async fn seed_users(repository: &UserRepository) -> Result<usize, StoreError> {
    if repository.count().await? > 0 {
        tracing::debug!("Users already present, skipping seed");
        return Ok(0);
    }

    for (username, email, password) in SEED_USERS {
        repository.save(User::new(username, email, password)).await?;
    }

    tracing::info!(count = SEED_USERS.len(), "Seeded users");
    Ok(SEED_USERS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_seed_inserts_once() {
        let repository = UserRepository::new(Database::open_in_memory().await.unwrap());

        assert_eq!(seed_users(&repository).await.unwrap(), 5);
        assert_eq!(seed_users(&repository).await.unwrap(), 0);

        let users = repository.find_all().await.unwrap();
        assert_eq!(users.len(), 5);
        assert_eq!(users[0].username, "Ahmed");
        assert_eq!(users[4].email, "youssef@example.com");
    }
}
