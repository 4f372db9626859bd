use sqlx::FromRow;

/// A row of the `users` table. The password is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl User {
    /// Plain byte-for-byte comparison against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: &str) -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_matches_exact() {
        assert!(user("secret1").password_matches("secret1"));
    }

    #[test]
    fn test_password_is_case_sensitive() {
        assert!(!user("secret1").password_matches("Secret1"));
    }

    #[test]
    fn test_password_does_not_trim() {
        assert!(!user("secret1").password_matches("secret1 "));
        assert!(!user("secret1").password_matches(""));
    }
}
