use crate::dtos::{ReminderDTO, VerificationRecordDTO};
use pillsync_domain::{Frequency, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medicine_name: String,
        pub dosage: String,
        /// Wall-clock HH:MM
        pub scheduled_time: String,
        pub frequency: Frequency,
        pub custom_days: Option<Vec<u32>>,
        /// IANA timezone name, defaults to UTC
        pub timezone: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod verify_reminder {
    use super::*;
    use pillsync_domain::VerificationRecord;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub verification: VerificationRecordDTO,
        /// False when another evaluation resolved the occurrence first
        pub schedule_advanced: bool,
    }

    impl APIResponse {
        pub fn new(
            reminder: Reminder,
            verification: VerificationRecord,
            schedule_advanced: bool,
        ) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                verification: VerificationRecordDTO::new(verification),
                schedule_advanced,
            }
        }
    }
}

pub mod monitor_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub processed: usize,
        pub alerts_sent: usize,
    }
}
