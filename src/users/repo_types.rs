use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use super::password::{hash_password, verify_password};

/// Row of the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub favorite_color: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_added: OffsetDateTime,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never rendered
}

impl User {
    pub fn check_password(&self, plain: &str) -> anyhow::Result<bool> {
        verify_password(plain, &self.password_hash)
    }
}

/// A user about to be inserted. Only the hash of the password is kept.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub favorite_color: Option<String>,
    password_hash: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        favorite_color: Option<String>,
        password: &str,
    ) -> anyhow::Result<Self> {
        let mut user = Self {
            name: name.into(),
            email: email.into(),
            favorite_color,
            password_hash: String::new(),
        };
        user.set_password(password)?;
        Ok(user)
    }

    pub fn set_password(&mut self, password: &str) -> anyhow::Result<()> {
        self.password_hash = hash_password(password)?;
        Ok(())
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Fields the update action may overwrite.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub favorite_color: Option<String>,
}
