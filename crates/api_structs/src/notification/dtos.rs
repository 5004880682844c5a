use pillsync_domain::{Notification, NotificationPriority, NotificationType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient_id: ID,
    pub subject_id: ID,
    pub title: String,
    pub message: String,
    pub reminder_id: Option<ID>,
    pub medicine_name: Option<String>,
    pub timestamp: i64,
    pub read: bool,
    pub priority: NotificationPriority,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id.clone(),
            notification_type: notification.notification_type,
            recipient_id: notification.recipient_id.clone(),
            subject_id: notification.subject_id.clone(),
            title: notification.title,
            message: notification.message,
            reminder_id: notification.reminder_id,
            medicine_name: notification.medicine_name,
            timestamp: notification.timestamp,
            read: notification.read,
            priority: notification.priority,
        }
    }
}
