use pillsync_domain::{
    Frequency, MatchStatus, Reminder, ReminderStatus, VerificationRecord, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub medicine_name: String,
    pub dosage: String,
    /// Wall-clock HH:MM in the reminder's timezone
    pub scheduled_time: String,
    pub frequency: Frequency,
    pub custom_days: Vec<u32>,
    pub timezone: String,
    pub status: ReminderStatus,
    pub next_scheduled_date: i64,
    pub snoozed_until: Option<i64>,
    pub last_taken_at: Option<i64>,
    pub created_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            medicine_name: reminder.medicine_name,
            dosage: reminder.dosage,
            scheduled_time: reminder.schedule.time.to_string(),
            frequency: reminder.schedule.frequency,
            custom_days: reminder.schedule.custom_days,
            timezone: reminder.schedule.timezone.name().to_string(),
            status: reminder.status,
            next_scheduled_date: reminder.next_scheduled,
            snoozed_until: reminder.snoozed_until,
            last_taken_at: reminder.last_taken_at,
            created_at: reminder.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecordDTO {
    pub id: ID,
    pub reminder_id: ID,
    pub user_id: ID,
    pub medicine_name: String,
    pub photo_reference: String,
    pub recognized_text: String,
    pub match_status: MatchStatus,
    pub timestamp: i64,
}

impl VerificationRecordDTO {
    pub fn new(record: VerificationRecord) -> Self {
        Self {
            id: record.id.clone(),
            reminder_id: record.reminder_id.clone(),
            user_id: record.user_id.clone(),
            medicine_name: record.medicine_name,
            photo_reference: record.photo_reference,
            recognized_text: record.recognized_text,
            match_status: record.match_status,
            timestamp: record.timestamp,
        }
    }
}
