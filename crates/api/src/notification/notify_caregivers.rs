use crate::shared::usecase::UseCase;
use futures::future::join_all;
use pillsync_domain::{
    MatchStatus, Notification, NotificationPriority, NotificationType, Reminder, ID,
};
use pillsync_infra::{PillsyncContext, PushMessage};
use std::collections::HashMap;
use tracing::{error, warn};

/// The events a subject's caregivers are informed about
#[derive(Debug)]
pub enum CaregiverEvent {
    MissedDose { reminder: Reminder },
    DoseTaken { reminder: Reminder, match_status: MatchStatus },
}

/// Fans one event out to every caregiver linked to the subject at call time.
/// One notification record per caregiver is the durable outcome; push
/// delivery on top is best-effort and failures never abort the fan-out.
#[derive(Debug)]
pub struct NotifyCaregiversUseCase {
    pub subject_id: ID,
    pub event: CaregiverEvent,
}

/// `notified` counts persisted notification records, `delivered` counts
/// successful push deliveries.
#[derive(Debug, PartialEq)]
pub struct FanoutReport {
    pub notified: usize,
    pub delivered: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for NotifyCaregiversUseCase {
    type Response = FanoutReport;

    type Error = UseCaseError;

    const NAME: &'static str = "NotifyCaregivers";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let subject = match ctx.repos.users.find(&self.subject_id).await {
            Some(subject) => subject,
            None => {
                warn!(
                    "Caregiver fan-out skipped, subject: {} does not exist",
                    self.subject_id
                );
                return Ok(FanoutReport {
                    notified: 0,
                    delivered: 0,
                });
            }
        };

        // The caregiver set is resolved now, at fan-out time. An empty set
        // is a documented no-op, not an error.
        if subject.caregivers.is_empty() {
            return Ok(FanoutReport {
                notified: 0,
                delivered: 0,
            });
        }

        let now = ctx.sys.get_timestamp_millis();
        let (reminder, notification_type, priority, title, message) = match &self.event {
            CaregiverEvent::MissedDose { reminder } => (
                reminder,
                NotificationType::MissedReminder,
                NotificationPriority::High,
                format!("Missed medicine alert - {}", subject.name),
                format!(
                    "{} may have missed their scheduled dose of {} at {}. Please check in.",
                    subject.name, reminder.medicine_name, reminder.schedule.time
                ),
            ),
            CaregiverEvent::DoseTaken {
                reminder,
                match_status: MatchStatus::Match,
            } => (
                reminder,
                NotificationType::MedicineTaken,
                NotificationPriority::Normal,
                format!("Medicine taken - {}", subject.name),
                format!(
                    "{} verified taking {} ({}) correctly.",
                    subject.name, reminder.medicine_name, reminder.dosage
                ),
            ),
            CaregiverEvent::DoseTaken {
                reminder,
                match_status: MatchStatus::Mismatch,
            } => (
                reminder,
                NotificationType::WrongMedicine,
                NotificationPriority::High,
                format!("Wrong medicine alert - {}", subject.name),
                format!(
                    "{} took a medicine that did not match {} ({}).",
                    subject.name, reminder.medicine_name, reminder.dosage
                ),
            ),
        };

        let mut notified = 0;
        for caregiver_id in &subject.caregivers {
            let mut notification = Notification::new(
                notification_type,
                caregiver_id.clone(),
                subject.id.clone(),
                title.clone(),
                message.clone(),
                priority,
                now,
            );
            notification.reminder_id = Some(reminder.id.clone());
            notification.medicine_name = Some(reminder.medicine_name.clone());

            // A failed insert for one caregiver must not keep the others
            // from being notified
            match ctx.repos.notifications.insert(&notification).await {
                Ok(_) => notified += 1,
                Err(e) => error!(
                    "Failed to store notification for caregiver: {}. Err: {:?}",
                    caregiver_id, e
                ),
            }
        }

        let mut data = HashMap::new();
        data.insert("subjectId".to_string(), subject.id.as_string());
        data.insert("reminderId".to_string(), reminder.id.as_string());
        data.insert("medicineName".to_string(), reminder.medicine_name.clone());
        let push_message = PushMessage {
            title,
            body: message,
            data,
        };

        let deliveries = subject.caregivers.iter().map(|caregiver_id| {
            let push_message = &push_message;
            async move {
                ctx.gateways
                    .push
                    .deliver(caregiver_id, push_message)
                    .await
                    .map_err(|e| {
                        error!(
                            "Push delivery to caregiver: {} failed. Err: {:?}",
                            caregiver_id, e
                        );
                        e
                    })
            }
        });
        let delivered = join_all(deliveries)
            .await
            .into_iter()
            .filter(|res| res.is_ok())
            .count();

        Ok(FanoutReport {
            notified,
            delivered,
        })
    }
}
