use super::IAdherenceLogRepo;
use crate::repos::shared::inmemory_repo::*;
use pillsync_domain::{AdherenceLog, ID};

pub struct InMemoryAdherenceLogRepo {
    logs: std::sync::Mutex<Vec<AdherenceLog>>,
}

impl InMemoryAdherenceLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAdherenceLogRepo for InMemoryAdherenceLogRepo {
    async fn insert(&self, log: &AdherenceLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<AdherenceLog> {
        find_by(&self.logs, |log| log.user_id == *user_id)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> Vec<AdherenceLog> {
        find_by(&self.logs, |log| log.reminder_id == *reminder_id)
    }
}
