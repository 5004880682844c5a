mod adherence;
mod notification;
mod reminder;
mod shared;
mod user;
mod verification;

use adherence::InMemoryAdherenceLogRepo;
pub use adherence::IAdherenceLogRepo;
use notification::InMemoryNotificationRepo;
pub use notification::INotificationRepo;
use reminder::InMemoryReminderRepo;
pub use reminder::IReminderRepo;
use std::sync::Arc;
use user::InMemoryUserRepo;
pub use user::IUserRepo;
use verification::InMemoryVerificationRepo;
pub use verification::IVerificationRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub verifications: Arc<dyn IVerificationRepo>,
    pub adherence_logs: Arc<dyn IAdherenceLogRepo>,
}

impl Repos {
    /// The document store itself is an external collaborator; these inmemory
    /// adapters are the only persistence this engine owns.
    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            verifications: Arc::new(InMemoryVerificationRepo::new()),
            adherence_logs: Arc::new(InMemoryAdherenceLogRepo::new()),
        }
    }
}
