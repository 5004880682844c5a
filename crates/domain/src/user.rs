use crate::shared::entity::{Entity, ID};
use pillsync_utils::create_random_secret;

const SHARE_CODE_LEN: usize = 8;

/// The slice of a user profile this engine needs: identity, the linked
/// caregiver set resolved at fan-out time, and the share code caregivers
/// redeem to link themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub caregivers: Vec<ID>,
    pub share_code: String,
    pub created_at: i64,
}

impl User {
    pub fn new(name: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            caregivers: Vec::new(),
            share_code: Self::generate_share_code(),
            created_at: now,
        }
    }

    pub fn generate_share_code() -> String {
        create_random_secret(SHARE_CODE_LEN)
    }

    /// Adds a caregiver link. Returns false when the link already existed.
    pub fn add_caregiver(&mut self, caregiver_id: ID) -> bool {
        if self.caregivers.contains(&caregiver_id) {
            return false;
        }
        self.caregivers.push(caregiver_id);
        true
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_user_with_share_code() {
        let user = User::new("Alice".into(), 0);
        assert_eq!(user.share_code.len(), SHARE_CODE_LEN);
        assert!(user.caregivers.is_empty());
    }

    #[test]
    fn it_links_caregivers_idempotently() {
        let mut user = User::new("Alice".into(), 0);
        let caregiver = ID::new();
        assert!(user.add_caregiver(caregiver.clone()));
        assert!(!user.add_caregiver(caregiver));
        assert_eq!(user.caregivers.len(), 1);
    }
}
