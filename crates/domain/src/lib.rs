mod adherence;
mod notification;
pub mod recurrence;
mod reminder;
mod shared;
mod user;
mod verification;

pub use adherence::AdherenceLog;
pub use notification::{Notification, NotificationPriority, NotificationType};
pub use reminder::{
    Frequency, InvalidScheduleError, InvalidTimeOfDayError, OccurrenceCheck,
    OccurrencePrecondition, Reminder, ReminderPolicy, ReminderSchedule, ReminderStatus, TimeOfDay,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
pub use verification::{match_medicine_name, MatchStatus, VerificationRecord};
