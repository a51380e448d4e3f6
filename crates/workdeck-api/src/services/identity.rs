//! Registration and login.
//!
//! Passwords are hashed with Argon2id and the hash never leaves this module
//! except inside the `User` record (which skips it on serialization). Login
//! failures are deliberately uniform: unknown username and wrong password
//! return the same error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workdeck_core::constants::MIN_PASSWORD_LENGTH;
use workdeck_core::models::{LoginRequest, RegisterRequest, User};
use workdeck_core::AppError;
use workdeck_db::DocumentStore;

#[derive(Clone)]
pub struct IdentityService {
    documents: Arc<dyn DocumentStore>,
}

impl IdentityService {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        IdentityService { documents }
    }

    /// Create a new user account.
    ///
    /// Username uniqueness is read-then-write: two concurrent registrations
    /// of the same name can both pass the check, and the later write wins.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidInput(
                "Username is required".to_string(),
            ));
        }
        if request.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Password is required".to_string(),
            ));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.documents.get_user_by_username(username).await?.is_some() {
            return Err(AppError::InvalidInput("Username already exists".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            email: request.email,
            created_at: now,
            updated_at: now,
        };
        self.documents.put_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and return the user.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AppError> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let user = self
            .documents
            .get_user_by_username(&request.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    /// Fetch a user by id, for handlers that need to confirm the caller exists.
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.documents.get_user(id).await?)
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_rejects() {
        let hash = hash_password("hunter42").unwrap();
        assert!(verify_password("hunter42", &hash));
        assert!(!verify_password("hunter43", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
