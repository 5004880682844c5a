use crate::dtos::{AdherenceLogDTO, UserDTO, VerificationRecordDTO};
use pillsync_domain::{AdherenceLog, User, VerificationRecord, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod create_user {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
    }

    pub type APIResponse = UserResponse;
}

pub mod get_user {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type APIResponse = UserResponse;
}

pub mod connect_caregiver {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub caregiver_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub share_code: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub patient: UserDTO,
    }

    impl APIResponse {
        pub fn new(patient: User) -> Self {
            Self {
                patient: UserDTO::new(patient),
            }
        }
    }
}

pub mod get_adherence_log {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub logs: Vec<AdherenceLogDTO>,
    }

    impl APIResponse {
        pub fn new(logs: Vec<AdherenceLog>) -> Self {
            Self {
                logs: logs.into_iter().map(AdherenceLogDTO::new).collect(),
            }
        }
    }
}

pub mod get_verifications {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub verifications: Vec<VerificationRecordDTO>,
    }

    impl APIResponse {
        pub fn new(verifications: Vec<VerificationRecord>) -> Self {
            Self {
                verifications: verifications
                    .into_iter()
                    .map(VerificationRecordDTO::new)
                    .collect(),
            }
        }
    }
}
