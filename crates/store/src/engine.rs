use std::collections::BTreeMap;

use async_trait::async_trait;
use latency_workshop_common::{NewUser, StoreError, User, UserId, UserPatch, UserStore};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::seed::initial_users;

/// In-memory user table. Implements `UserStore`.
///
/// Ids are assigned from 1 upward and restart at 1 after a reset. Emails are
/// unique across the table.
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

struct Inner {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn insert(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.email_taken(&new.email, None) {
            return Err(StoreError::DuplicateEmail(new.email));
        }
        let user = User {
            id: self.next_id,
            name: new.name,
            email: new.email,
            role: new.role,
        };
        self.next_id += 1;
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn reseed(&mut self) -> Result<usize, StoreError> {
        self.users.clear();
        self.next_id = 1;
        let seed = initial_users();
        let count = seed.len();
        for user in seed {
            self.insert(user)?;
        }
        Ok(count)
    }
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert the seed users if the table is empty. Returns the number
    /// inserted, or `None` if users were already present.
    pub async fn seed_if_empty(&self) -> Result<Option<usize>, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.users.is_empty() {
            info!(count = inner.users.len(), "store already populated");
            return Ok(None);
        }
        let count = inner.reseed()?;
        info!(count, "seeded initial users");
        Ok(Some(count))
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        let inner = self.inner.lock().await;
        inner.users.get(&id).cloned().ok_or(StoreError::UserNotFound(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        let user = inner.insert(user)?;
        debug!(id = user.id, email = %user.email, "user inserted");
        Ok(user)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.users.contains_key(&id) {
            return Err(StoreError::UserNotFound(id));
        }
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }
        if let Some(email) = &patch.email {
            if inner.email_taken(email, Some(id)) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.users.remove(&id).ok_or(StoreError::UserNotFound(id))
    }

    async fn reset(&self) -> Result<usize, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.reseed()
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.lock().await.users.len())
    }
}
