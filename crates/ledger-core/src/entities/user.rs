//! User entity - the owner of accounts, budgets, and transactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Registered user
///
/// The password hash is never part of the entity; repositories expose it
/// separately so it cannot leak into a cached or serialized user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(email: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            display_name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("ana@example.com".to_string(), "Ana".to_string());
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }
}
