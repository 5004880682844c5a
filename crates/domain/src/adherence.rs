use crate::reminder::ReminderStatus;
use crate::shared::entity::{Entity, ID};

/// Append-only adherence history: one entry per resolved occurrence.
/// `status` is always `Taken` or `Missed`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceLog {
    pub id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
    pub medicine_name: String,
    pub dosage: String,
    /// When the resolved occurrence was scheduled
    pub scheduled_at: i64,
    pub status: ReminderStatus,
    pub timestamp: i64,
}

impl AdherenceLog {
    pub fn taken(reminder: &crate::Reminder, now: i64, scheduled_at: i64) -> Self {
        Self::entry(reminder, ReminderStatus::Taken, now, scheduled_at)
    }

    pub fn missed(reminder: &crate::Reminder, now: i64, scheduled_at: i64) -> Self {
        Self::entry(reminder, ReminderStatus::Missed, now, scheduled_at)
    }

    fn entry(
        reminder: &crate::Reminder,
        status: ReminderStatus,
        now: i64,
        scheduled_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
            medicine_name: reminder.medicine_name.clone(),
            dosage: reminder.dosage.clone(),
            scheduled_at,
            status,
            timestamp: now,
        }
    }
}

impl Entity for AdherenceLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
