mod inmemory;

pub use inmemory::InMemoryVerificationRepo;
use pillsync_domain::{VerificationRecord, ID};

#[async_trait::async_trait]
pub trait IVerificationRepo: Send + Sync {
    async fn insert(&self, record: &VerificationRecord) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<VerificationRecord>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<VerificationRecord>;
}
