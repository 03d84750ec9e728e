//! User entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audit::AuditValue;

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned id; `None` until saved.
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Create an unsaved user.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Same user with the given id.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id=")?;
        match self.id {
            Some(id) => write!(f, "{id}")?,
            None => f.write_str(crate::audit::NULL_LITERAL)?,
        }
        write!(
            f,
            ", username={}, email={}, password={})",
            self.username, self.email, self.password
        )
    }
}

impl AuditValue for User {
    fn audit_repr(&self) -> Option<String> {
        Some(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unsaved_user() {
        let user = User::new("Ahmed", "ahmed@example.com", "password1");
        assert_eq!(
            user.to_string(),
            "User(id=null, username=Ahmed, email=ahmed@example.com, password=password1)"
        );
    }

    #[test]
    fn test_display_saved_user() {
        let user = User::new("Sara", "sara@example.com", "password4").with_id(4);
        assert_eq!(
            user.to_string(),
            "User(id=4, username=Sara, email=sara@example.com, password=password4)"
        );
    }

    #[test]
    fn test_deserialize_without_id() {
        let json = r#"{"username":"Ahmed","email":"ahmed@example.com","password":"password1"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.id.is_none());
        assert_eq!(user.username, "Ahmed");
    }
}
