//! Per-user follow lists

use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Default)]
pub struct FollowStore {
    /// Dataset ids in follow order
    by_user: RwLock<HashMap<Uuid, Vec<String>>>,
}

impl FollowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(&self, user_id: Uuid, dataset_id: &str) -> AppResult<()> {
        let mut follows = self.by_user.write();
        let list = follows.entry(user_id).or_default();

        if list.iter().any(|id| id == dataset_id) {
            return Err(AppError::AlreadyExists("Already followed".to_string()));
        }

        list.push(dataset_id.to_string());
        Ok(())
    }

    pub fn unfollow(&self, user_id: Uuid, dataset_id: &str) -> AppResult<()> {
        let mut follows = self.by_user.write();
        let list = follows
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("Not followed".to_string()))?;

        let position = list
            .iter()
            .position(|id| id == dataset_id)
            .ok_or_else(|| AppError::NotFound("Not followed".to_string()))?;

        list.remove(position);
        Ok(())
    }

    pub fn is_following(&self, user_id: Uuid, dataset_id: &str) -> bool {
        self.by_user
            .read()
            .get(&user_id)
            .is_some_and(|list| list.iter().any(|id| id == dataset_id))
    }

    pub fn list(&self, user_id: Uuid) -> Vec<String> {
        self.by_user.read().get(&user_id).cloned().unwrap_or_default()
    }
}
