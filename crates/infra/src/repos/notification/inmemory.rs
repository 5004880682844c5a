use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use pillsync_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_recipient(&self, recipient_id: &ID, unread_only: bool) -> Vec<Notification> {
        find_by(&self.notifications, |notification| {
            notification.recipient_id == *recipient_id && (!unread_only || !notification.read)
        })
    }

    async fn mark_read(&self, notification_id: &ID, recipient_id: &ID) -> anyhow::Result<bool> {
        let applied = update_checked(
            notification_id,
            &self.notifications,
            |notification| notification.recipient_id == *recipient_id,
            |notification| notification.read = true,
        );
        Ok(applied)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_domain::{NotificationPriority, NotificationType};

    fn notification_factory(recipient_id: &ID) -> Notification {
        Notification::new(
            NotificationType::MissedReminder,
            recipient_id.clone(),
            ID::new(),
            "Missed medicine alert".into(),
            "Alice may have missed Paracetamol".into(),
            NotificationPriority::High,
            0,
        )
    }

    #[tokio::test]
    async fn only_the_recipient_can_mark_read() {
        let repo = InMemoryNotificationRepo::new();
        let recipient = ID::new();
        let notification = notification_factory(&recipient);
        repo.insert(&notification).await.unwrap();

        let intruder = ID::new();
        assert!(!repo.mark_read(&notification.id, &intruder).await.unwrap());
        assert!(repo.mark_read(&notification.id, &recipient).await.unwrap());

        let unread = repo.find_by_recipient(&recipient, true).await;
        assert!(unread.is_empty());
        let all = repo.find_by_recipient(&recipient, false).await;
        assert_eq!(all.len(), 1);
        assert!(all[0].read);
    }
}
