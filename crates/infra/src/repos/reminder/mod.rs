mod inmemory;

pub use inmemory::InMemoryReminderRepo;
use pillsync_domain::{OccurrencePrecondition, Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    /// All reminders across all users with an unresolved occurrence
    /// (pending or snoozed). This is the sweep read.
    async fn find_unresolved(&self) -> Vec<Reminder>;
    /// Conditional write: persists `reminder` only when the stored document
    /// still exists and its status and next occurrence match `precondition`.
    /// Returns false when another writer resolved the occurrence first or
    /// the reminder was deleted mid-evaluation.
    async fn save_checked(
        &self,
        reminder: &Reminder,
        precondition: &OccurrencePrecondition,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}
