mod inmemory;

pub use inmemory::InMemoryUserRepo;
use pillsync_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_share_code(&self, share_code: &str) -> Option<User>;
    /// Links a caregiver to the user inside the store's transaction
    /// boundary. Returns false when the link already existed.
    async fn add_caregiver(&self, user_id: &ID, caregiver_id: &ID) -> anyhow::Result<bool>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}
