/**
 * User Model and Storage
 *
 * This module holds the user record and the `UserStore` abstraction the
 * handlers talk to. Two stores implement it: `MemoryUserStore` here, used
 * when no database is configured and by the tests, and `PgUserStore` in
 * `auth::db`.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::backend::error::{StoreError, StoreResult};
use crate::shared::ObjectId;

/// A registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ObjectId,
    pub username: String,
    /// Unique across all users
    pub email: String,
    /// bcrypt hash; never sent to clients
    pub password_hash: String,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an unconfirmed user with a fresh id
    pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            username: username.into(),
            email: email.into(),
            password_hash,
            is_confirmed: false,
            created_at: Utc::now(),
        }
    }
}

/// User document returned to clients (without the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub is_confirmed: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_confirmed: user.is_confirmed,
        }
    }
}

/// Persistence operations for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user
    ///
    /// # Errors
    /// `StoreError::Duplicate("email")` if the email is already registered
    async fn create_user(&self, user: User) -> StoreResult<User>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>>;

    /// Flip `is_confirmed` on; returns the updated user, or `None` if the
    /// email is unknown
    async fn mark_confirmed(&self, email: &str) -> StoreResult<Option<User>>;
}

/// In-process user store
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn mark_confirmed(&self, email: &str) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users
            .values_mut()
            .find(|user| user.email == email)
            .map(|user| {
                user.is_confirmed = true;
                user.clone()
            }))
    }
}
