use crate::error::PillsyncError;
use crate::notification::notify_caregivers::{CaregiverEvent, NotifyCaregiversUseCase};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::monitor_reminders::*;
use pillsync_domain::{
    AdherenceLog, Notification, NotificationPriority, NotificationType, OccurrenceCheck, Reminder,
};
use pillsync_infra::{PillsyncContext, PushMessage};
use std::collections::HashMap;
use tracing::error;

/// The external sweep entry point: run one evaluation pass over every
/// unresolved reminder, meant to be invoked on a fixed cadence by an
/// operator scheduler.
pub async fn monitor_reminders_controller(
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = MonitorRemindersUseCase {
        trigger: MonitorTrigger::Sweep,
    };

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse {
                processed: report.processed,
                alerts_sent: report.alerts_sent,
            })
        })
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub enum MonitorTrigger {
    /// The in-process evaluation task that runs while the server is up
    SessionTimer,
    /// The stateless externally-scheduled pass over all reminders
    Sweep,
}

/// Evaluates every unresolved reminder against wall-clock time and applies
/// the due/missed transitions. Both trigger paths run this same use case;
/// they reconcile purely through the conditional writes, so evaluating the
/// same window twice escalates each missed occurrence at most once.
#[derive(Debug)]
pub struct MonitorRemindersUseCase {
    pub trigger: MonitorTrigger,
}

#[derive(Debug)]
pub struct MonitorReport {
    pub processed: usize,
    pub alerts_sent: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MonitorRemindersUseCase {
    type Response = MonitorReport;

    type Error = UseCaseError;

    const NAME: &'static str = "MonitorReminders";

    /// This will run every minute
    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let policy = ctx.config.reminder_policy;
        let reminders = ctx.repos.reminders.find_unresolved().await;

        let mut report = MonitorReport {
            processed: 0,
            alerts_sent: 0,
        };
        for reminder in reminders {
            match reminder.check_occurrence(now, &policy) {
                OccurrenceCheck::Due => {
                    report.processed += 1;
                    if send_due_alert(&reminder, now, ctx).await {
                        report.alerts_sent += 1;
                    }
                }
                OccurrenceCheck::Missed => {
                    report.processed += 1;
                    escalate_missed(reminder, now, ctx).await;
                }
                _ => (),
            }
        }

        Ok(report)
    }
}

/// Surfaces the due alert to the subject. Informational: nothing on the
/// reminder itself changes until the user snoozes or verifies.
async fn send_due_alert(reminder: &Reminder, now: i64, ctx: &PillsyncContext) -> bool {
    let mut notification = Notification::new(
        NotificationType::ReminderDue,
        reminder.user_id.clone(),
        reminder.user_id.clone(),
        "Time to take your medicine".into(),
        format!(
            "It's time to take {} ({})",
            reminder.medicine_name, reminder.dosage
        ),
        NotificationPriority::High,
        now,
    );
    notification.reminder_id = Some(reminder.id.clone());
    notification.medicine_name = Some(reminder.medicine_name.clone());

    if let Err(e) = ctx.repos.notifications.insert(&notification).await {
        error!(
            "Failed to store due alert for reminder: {}. Err: {:?}",
            reminder.id, e
        );
        return false;
    }

    let mut data = HashMap::new();
    data.insert("reminderId".to_string(), reminder.id.as_string());
    data.insert("medicineName".to_string(), reminder.medicine_name.clone());
    let push_message = PushMessage {
        title: notification.title.clone(),
        body: notification.message.clone(),
        data,
    };
    if let Err(e) = ctx
        .gateways
        .push
        .deliver(&reminder.user_id, &push_message)
        .await
    {
        // Best-effort: the stored notification is the durable alert
        error!(
            "Push delivery of due alert for reminder: {} failed. Err: {:?}",
            reminder.id, e
        );
    }

    true
}

/// Escalates a missed occurrence: ONE conditional write advances the
/// schedule and re-arms the reminder, and only the writer that wins it logs
/// the missed dose and fans out to caregivers. A lost write means the other
/// trigger path (or the user) already resolved the occurrence.
async fn escalate_missed(reminder: Reminder, now: i64, ctx: &PillsyncContext) {
    let precondition = reminder.precondition();
    let scheduled_at = reminder.next_scheduled;
    let mut resolved = reminder.clone();
    resolved.resolve_missed(now);

    match ctx
        .repos
        .reminders
        .save_checked(&resolved, &precondition)
        .await
    {
        Ok(true) => (),
        Ok(false) => return,
        Err(e) => {
            // Leave the reminder untouched; the next tick re-evaluates it
            error!(
                "Failed to apply missed transition for reminder: {}. Err: {:?}",
                reminder.id, e
            );
            return;
        }
    }

    let log = AdherenceLog::missed(&resolved, now, scheduled_at);
    if let Err(e) = ctx.repos.adherence_logs.insert(&log).await {
        error!(
            "Failed to store adherence log for reminder: {}. Err: {:?}",
            reminder.id, e
        );
    }

    let mut notification = Notification::new(
        NotificationType::MissedReminder,
        reminder.user_id.clone(),
        reminder.user_id.clone(),
        "Missed medicine".into(),
        format!(
            "You may have missed {}. Please take it if you haven't.",
            reminder.medicine_name
        ),
        NotificationPriority::High,
        now,
    );
    notification.reminder_id = Some(reminder.id.clone());
    notification.medicine_name = Some(reminder.medicine_name.clone());
    if let Err(e) = ctx.repos.notifications.insert(&notification).await {
        error!(
            "Failed to store missed notification for reminder: {}. Err: {:?}",
            reminder.id, e
        );
    }

    let notify_caregivers = NotifyCaregiversUseCase {
        subject_id: reminder.user_id.clone(),
        event: CaregiverEvent::MissedDose { reminder },
    };

    // Sideeffect, ignore result
    let _ = execute(notify_caregivers, ctx).await;
}
