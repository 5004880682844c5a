use crate::dtos::NotificationDTO;
use pillsync_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

pub mod get_notifications {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub unread_only: Option<bool>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}
