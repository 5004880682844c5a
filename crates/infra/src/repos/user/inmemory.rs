use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use pillsync_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_share_code(&self, share_code: &str) -> Option<User> {
        find_by(&self.users, |user| user.share_code == share_code)
            .into_iter()
            .next()
    }

    async fn add_caregiver(&self, user_id: &ID, caregiver_id: &ID) -> anyhow::Result<bool> {
        let mut linked = false;
        let applied = update_checked(
            user_id,
            &self.users,
            |_| true,
            |user| linked = user.add_caregiver(caregiver_id.clone()),
        );
        Ok(applied && linked)
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        delete(user_id, &self.users)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn add_caregiver_is_idempotent() {
        let repo = InMemoryUserRepo::new();
        let user = User::new("Alice".into(), 0);
        repo.insert(&user).await.unwrap();

        let caregiver = ID::new();
        assert!(repo.add_caregiver(&user.id, &caregiver).await.unwrap());
        assert!(!repo.add_caregiver(&user.id, &caregiver).await.unwrap());

        let stored = repo.find(&user.id).await.expect("User to exist");
        assert_eq!(stored.caregivers, vec![caregiver]);
    }

    #[tokio::test]
    async fn it_finds_user_by_share_code() {
        let repo = InMemoryUserRepo::new();
        let user = User::new("Alice".into(), 0);
        repo.insert(&user).await.unwrap();

        let found = repo.find_by_share_code(&user.share_code).await;
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(repo.find_by_share_code("nope").await.is_none());
    }
}
