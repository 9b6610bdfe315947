//! In-memory user directory

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::models::{normalize_email, User};
use crate::{AppError, AppResult};

#[derive(Default)]
pub struct UserDirectory {
    by_email: RwLock<HashMap<String, User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.by_email.write();
        if users.contains_key(&user.email) {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    /// Existing user for the email, or a freshly minted one
    pub fn find_or_create(&self, email: &str) -> User {
        let key = normalize_email(email);
        self.by_email
            .write()
            .entry(key)
            .or_insert_with(|| User::from_email(email))
            .clone()
    }
}
