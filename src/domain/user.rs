//! Registered users: credentials, email uniqueness and profile data.
//!
//! [`UserDirectory`] is the source of truth for who exists on the
//! platform. Registration allocates the user id that the wallet account
//! is opened under, so user id and account id share their numeric value.
//! Passwords are stored as Argon2id hashes and verified on login.

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::UserId;
use super::ids::IdSequence;
use crate::error::GatewayError;

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user identifier.
    pub user_id: UserId,
    /// Registration email, unique across the directory.
    pub email: String,
    /// Argon2id hash of the password in PHC string format.
    password_hash: String,
    /// Optional public display name.
    pub display_name: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Profile view of a user, without credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User identifier.
    pub user_id: UserId,
    /// Registration email.
    pub email: String,
    /// Public display name, if set.
    pub display_name: Option<String>,
    /// Phone number, if set.
    pub phone: Option<String>,
    /// Avatar URL, if set.
    pub avatar_url: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            phone: user.phone.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Partial profile update. `None` leaves a field untouched; a provided
/// empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name, empty to clear.
    pub display_name: Option<String>,
    /// New phone number, empty to clear.
    pub phone: Option<String>,
    /// New avatar URL, empty to clear.
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// Store of all registered users.
///
/// A single lock guards the whole directory: registration checks email
/// uniqueness and inserts under one write guard, so two concurrent
/// registrations with the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<DirectoryInner>,
    sequence: IdSequence,
}

impl UserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and returns the freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the email has no `@`,
    /// the password is empty, or the email is already registered, and
    /// [`GatewayError::Internal`] if password hashing fails.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId, GatewayError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(GatewayError::InvalidRequest(
                "invalid email address".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "password must not be empty".to_string(),
            ));
        }
        let password_hash = hash_password(password)?;

        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(email) {
            return Err(GatewayError::InvalidRequest(format!(
                "email {email} is already registered"
            )));
        }
        let user_id = UserId::new(self.sequence.next_value());
        let user = User {
            user_id,
            email: email.to_string(),
            password_hash,
            display_name: None,
            phone: None,
            avatar_url: None,
            created_at: Utc::now(),
        };
        inner.by_email.insert(user.email.clone(), user_id);
        inner.users.insert(user_id, user);
        Ok(user_id)
    }

    /// Checks an email/password pair and returns the matching user id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidCredentials`] whether the email is
    /// unknown or the password does not match; callers cannot distinguish
    /// the two.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserId, GatewayError> {
        let inner = self.inner.read().await;
        let user = inner
            .by_email
            .get(email.trim())
            .and_then(|id| inner.users.get(id))
            .ok_or(GatewayError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|_| GatewayError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| GatewayError::InvalidCredentials)?;
        Ok(user.user_id)
    }

    /// Returns `true` if a user with the given id exists.
    pub async fn contains(&self, user_id: UserId) -> bool {
        self.inner.read().await.users.contains_key(&user_id)
    }

    /// Returns the profile of a user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UserNotFound`] if the user does not exist.
    pub async fn profile(&self, user_id: UserId) -> Result<UserProfile, GatewayError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&user_id)
            .map(UserProfile::from)
            .ok_or(GatewayError::UserNotFound(user_id))
    }

    /// Applies a partial profile update and returns the resulting profile.
    ///
    /// Fields left `None` are untouched; provided-but-empty values clear
    /// the field. The whole update is validated before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UserNotFound`] if the user does not exist
    /// and [`GatewayError::InvalidRequest`] if a non-empty phone number is
    /// shorter than 6 characters (nothing is modified in that case).
    pub async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, GatewayError> {
        if let Some(phone) = update.phone.as_deref() {
            let phone = phone.trim();
            if !phone.is_empty() && phone.chars().count() < 6 {
                return Err(GatewayError::InvalidRequest(
                    "phone number must have at least 6 characters".to_string(),
                ));
            }
        }

        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(GatewayError::UserNotFound(user_id))?;

        if let Some(name) = update.display_name {
            user.display_name = non_empty(&name);
        }
        if let Some(phone) = update.phone {
            user.phone = non_empty(&phone);
        }
        if let Some(url) = update.avatar_url {
            user.avatar_url = non_empty(&url);
        }
        Ok(UserProfile::from(&*user))
    }

    /// Sets (or clears, when empty) the avatar URL and returns the
    /// resulting profile.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UserNotFound`] if the user does not exist.
    pub async fn set_avatar(&self, user_id: UserId, url: &str) -> Result<UserProfile, GatewayError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(GatewayError::UserNotFound(user_id))?;
        user.avatar_url = non_empty(url);
        Ok(UserProfile::from(&*user))
    }

    /// Returns the number of registered users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Returns `true` if nobody is registered.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}

fn hash_password(password: &str) -> Result<String, GatewayError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| GatewayError::Internal("password hashing failed".to_string()))?
        .to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
