use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ReminderDue,
    MissedReminder,
    MedicineTaken,
    WrongMedicine,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Normal,
    High,
}

/// One notification row per (recipient, event). The in-store notification is
/// the durable record; push delivery on top of it is best-effort.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub notification_type: NotificationType,
    /// Who sees this notification
    pub recipient_id: ID,
    /// Whose event it concerns
    pub subject_id: ID,
    pub title: String,
    pub message: String,
    pub reminder_id: Option<ID>,
    pub medicine_name: Option<String>,
    pub timestamp: i64,
    /// Mutated only by the recipient reading it
    pub read: bool,
    pub priority: NotificationPriority,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        recipient_id: ID,
        subject_id: ID,
        title: String,
        message: String,
        priority: NotificationPriority,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            notification_type,
            recipient_id,
            subject_id,
            title,
            message,
            reminder_id: None,
            medicine_name: None,
            timestamp,
            read: false,
            priority,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
