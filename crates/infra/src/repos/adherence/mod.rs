mod inmemory;

pub use inmemory::InMemoryAdherenceLogRepo;
use pillsync_domain::{AdherenceLog, ID};

#[async_trait::async_trait]
pub trait IAdherenceLogRepo: Send + Sync {
    async fn insert(&self, log: &AdherenceLog) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<AdherenceLog>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<AdherenceLog>;
}
