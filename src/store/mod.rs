//! In-memory state shared by handlers

mod follows;
mod sessions;
mod users;

pub use follows::FollowStore;
pub use sessions::{hash_token, InMemorySessionStore, Session, SessionStore};
pub use users::UserDirectory;

use std::sync::Arc;

#[derive(Clone)]
pub struct Store {
    pub users: Arc<UserDirectory>,
    pub sessions: Arc<dyn SessionStore>,
    pub follows: Arc<FollowStore>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(InMemorySessionStore::new()))
    }
}

impl Store {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            users: Arc::new(UserDirectory::new()),
            sessions,
            follows: Arc::new(FollowStore::new()),
        }
    }
}
