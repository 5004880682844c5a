use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use pillsync_domain::{OccurrencePrecondition, Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |reminder| reminder.user_id == *user_id)
    }

    async fn find_unresolved(&self) -> Vec<Reminder> {
        find_by(&self.reminders, |reminder| reminder.is_unresolved())
    }

    async fn save_checked(
        &self,
        reminder: &Reminder,
        precondition: &OccurrencePrecondition,
    ) -> anyhow::Result<bool> {
        let applied = update_checked(
            &reminder.id,
            &self.reminders,
            |stored| stored.precondition() == *precondition,
            |stored| *stored = reminder.clone(),
        );
        Ok(applied)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_domain::{Frequency, ReminderSchedule, TimeOfDay};

    fn reminder_factory() -> Reminder {
        let schedule = ReminderSchedule::new(
            TimeOfDay {
                hours: 9,
                minutes: 0,
            },
            Frequency::Daily,
            Vec::new(),
            chrono_tz::UTC,
        )
        .expect("Valid schedule");
        Reminder::new(
            Default::default(),
            "Paracetamol".into(),
            "500mg".into(),
            schedule,
            0,
        )
    }

    #[tokio::test]
    async fn save_checked_applies_once_per_precondition() {
        let repo = InMemoryReminderRepo::new();
        let reminder = reminder_factory();
        repo.insert(&reminder).await.unwrap();

        let precondition = reminder.precondition();
        let mut resolved = reminder.clone();
        resolved.resolve_taken(reminder.next_scheduled);

        assert!(repo.save_checked(&resolved, &precondition).await.unwrap());
        // Second writer with the stale precondition must no-op
        assert!(!repo.save_checked(&resolved, &precondition).await.unwrap());

        let stored = repo.find(&reminder.id).await.expect("Reminder to exist");
        assert_eq!(stored.next_scheduled, resolved.next_scheduled);
    }

    #[tokio::test]
    async fn save_checked_noops_when_reminder_was_deleted() {
        let repo = InMemoryReminderRepo::new();
        let reminder = reminder_factory();
        repo.insert(&reminder).await.unwrap();

        let precondition = reminder.precondition();
        repo.delete(&reminder.id).await;

        assert!(!repo.save_checked(&reminder, &precondition).await.unwrap());
    }

    #[tokio::test]
    async fn find_unresolved_skips_other_users_resolved_state() {
        let repo = InMemoryReminderRepo::new();
        let reminder = reminder_factory();
        repo.insert(&reminder).await.unwrap();

        let unresolved = repo.find_unresolved().await;
        assert_eq!(unresolved.len(), 1);
    }
}
