mod inmemory;

pub use inmemory::InMemoryNotificationRepo;
use pillsync_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    async fn find_by_recipient(&self, recipient_id: &ID, unread_only: bool) -> Vec<Notification>;
    /// Marks a notification read. Only the recipient may flip the flag;
    /// returns false when the notification does not exist or belongs to
    /// someone else.
    async fn mark_read(&self, notification_id: &ID, recipient_id: &ID) -> anyhow::Result<bool>;
}
