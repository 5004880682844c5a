use super::IVerificationRepo;
use crate::repos::shared::inmemory_repo::*;
use pillsync_domain::{VerificationRecord, ID};

pub struct InMemoryVerificationRepo {
    records: std::sync::Mutex<Vec<VerificationRecord>>,
}

impl InMemoryVerificationRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVerificationRepo for InMemoryVerificationRepo {
    async fn insert(&self, record: &VerificationRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<VerificationRecord> {
        find_by(&self.records, |record| record.user_id == *user_id)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<VerificationRecord> {
        find_by(&self.records, |record| record.reminder_id == *reminder_id)
    }
}
