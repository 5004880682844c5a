use pillsync_domain::{AdherenceLog, ReminderStatus, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub name: String,
    pub caregivers: Vec<ID>,
    pub share_code: String,
    pub created_at: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name,
            caregivers: user.caregivers,
            share_code: user.share_code,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceLogDTO {
    pub id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
    pub medicine_name: String,
    pub dosage: String,
    pub scheduled_at: i64,
    pub status: ReminderStatus,
    pub timestamp: i64,
}

impl AdherenceLogDTO {
    pub fn new(log: AdherenceLog) -> Self {
        Self {
            id: log.id.clone(),
            user_id: log.user_id.clone(),
            reminder_id: log.reminder_id.clone(),
            medicine_name: log.medicine_name,
            dosage: log.dosage,
            scheduled_at: log.scheduled_at,
            status: log.status,
            timestamp: log.timestamp,
        }
    }
}
