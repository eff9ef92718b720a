use std::sync::Arc;

use latency_workshop_common::{NewUser, StoreError, User, UserId, UserPatch, UserStore};
use latency_workshop_latency::LatencyManager;
use tracing::info;

/// User operations with simulated latency.
///
/// Every operation waits out the delay for its class first and only then
/// touches the store, so the whole call observably takes at least the
/// configured delay.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    latency: LatencyManager,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, latency: LatencyManager) -> Self {
        Self { store, latency }
    }

    pub fn latency(&self) -> &LatencyManager {
        &self.latency
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.latency.await_read_delay().await;
        let users = self.store.list().await?;
        info!(count = users.len(), "listed users");
        Ok(users)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, StoreError> {
        self.latency.await_read_delay().await;
        let user = self.store.get(id).await?;
        info!(id, name = %user.name, "user found");
        Ok(user)
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        self.latency.await_write_delay().await;
        let user = self.store.create(new).await?;
        info!(id = user.id, name = %user.name, "user created");
        Ok(user)
    }

    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, StoreError> {
        self.latency.await_write_delay().await;
        let user = self.store.update(id, patch).await?;
        info!(id, name = %user.name, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: UserId) -> Result<User, StoreError> {
        self.latency.await_write_delay().await;
        let user = self.store.delete(id).await?;
        info!(id, name = %user.name, "user deleted");
        Ok(user)
    }

    /// Wipe the store and reinsert the seed users.
    pub async fn reset_users(&self) -> Result<usize, StoreError> {
        self.latency.await_write_delay().await;
        let count = self.store.reset().await?;
        info!(count, "user store reset");
        Ok(count)
    }
}
