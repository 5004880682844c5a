use crate::error::PillsyncError;
use crate::notification::notify_caregivers::{CaregiverEvent, NotifyCaregiversUseCase};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::verify_reminder::*;
use pillsync_domain::{match_medicine_name, AdherenceLog, Reminder, VerificationRecord, ID};
use pillsync_infra::PillsyncContext;
use tracing::warn;

pub async fn verify_reminder_controller(
    path_params: web::Path<PathParams>,
    photo: web::Bytes,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = VerifyReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
        photo: photo.to_vec(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.reminder,
                res.verification,
                res.schedule_advanced,
            ))
        })
        .map_err(PillsyncError::from)
}

/// Closes the current occurrence with photo evidence. The occurrence is
/// resolved regardless of the match verdict: a disputed verification must
/// never block the next dose from being scheduled.
#[derive(Debug)]
pub struct VerifyReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub photo: Vec<u8>,
}

#[derive(Debug)]
pub struct VerifyReminderResponse {
    pub reminder: Reminder,
    pub verification: VerificationRecord,
    /// False when a concurrent evaluation resolved the occurrence first
    pub schedule_advanced: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    PhotoUploadFailed,
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::PhotoUploadFailed => Self::BadClientData(
                "The verification photo could not be stored. Please retry.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for VerifyReminderUseCase {
    type Response = VerifyReminderResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "VerifyReminder";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        let now = ctx.sys.get_timestamp_millis();

        let photo_reference = ctx
            .gateways
            .photos
            .upload(&self.photo)
            .await
            .map_err(|_| UseCaseError::PhotoUploadFailed)?;

        // A failed or timed out recognition is "no text recognized", never a
        // hard error that blocks confirming the intake
        let recognized_text = match ctx.gateways.ocr.recognize_text(&self.photo).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Text recognition failed for reminder: {}. Err: {:?}",
                    reminder.id, e
                );
                String::new()
            }
        };
        let match_status = match_medicine_name(&recognized_text, &reminder.medicine_name);

        let precondition = reminder.precondition();
        let scheduled_at = reminder.next_scheduled;
        let mut resolved = reminder.clone();
        resolved.resolve_taken(now);

        let schedule_advanced = ctx
            .repos
            .reminders
            .save_checked(&resolved, &precondition)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if schedule_advanced {
            let log = AdherenceLog::taken(&resolved, now, scheduled_at);
            ctx.repos
                .adherence_logs
                .insert(&log)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        // The attempt itself is always recorded, append-only
        let verification = VerificationRecord {
            id: Default::default(),
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            medicine_name: reminder.medicine_name.clone(),
            photo_reference,
            recognized_text,
            match_status,
            timestamp: now,
        };
        ctx.repos
            .verifications
            .insert(&verification)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let reminder = if schedule_advanced {
            resolved
        } else {
            // Someone else resolved the occurrence; reflect the stored state
            ctx.repos
                .reminders
                .find(&self.reminder_id)
                .await
                .unwrap_or(reminder)
        };

        Ok(VerifyReminderResponse {
            reminder,
            verification,
            schedule_advanced,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyCaregiversOnVerification)]
    }
}

pub struct NotifyCaregiversOnVerification;

#[async_trait::async_trait(?Send)]
impl Subscriber<VerifyReminderUseCase> for NotifyCaregiversOnVerification {
    async fn notify(&self, e: &VerifyReminderResponse, ctx: &PillsyncContext) {
        let notify_caregivers = NotifyCaregiversUseCase {
            subject_id: e.reminder.user_id.clone(),
            event: CaregiverEvent::DoseTaken {
                reminder: e.reminder.clone(),
                match_status: e.verification.match_status,
            },
        };

        // Sideeffect, ignore result
        let _ = execute(notify_caregivers, ctx).await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_domain::{
        Frequency, MatchStatus, NotificationType, ReminderSchedule, ReminderStatus, TimeOfDay,
        User,
    };
    use pillsync_infra::{setup_context, InMemoryOcrGateway, InMemoryPushGateway, ISys};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    struct StaticTimeSys {
        now: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.now
        }
    }

    struct TestContext {
        ctx: PillsyncContext,
        ocr: Arc<InMemoryOcrGateway>,
        user: User,
        caregiver: ID,
        reminder: Reminder,
    }

    async fn setup(now: i64) -> TestContext {
        let mut ctx = setup_context();
        ctx.sys = Arc::new(StaticTimeSys { now });
        let ocr = Arc::new(InMemoryOcrGateway::new("paracetamol 500mg tablet"));
        ctx.gateways.ocr = ocr.clone();
        ctx.gateways.push = Arc::new(InMemoryPushGateway::new());

        let mut user = User::new("Alice".into(), now);
        let caregiver = ID::new();
        user.add_caregiver(caregiver.clone());
        ctx.repos.users.insert(&user).await.unwrap();

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
        let reminder = Reminder::new(
            user.id.clone(),
            "Paracetamol".into(),
            "500mg".into(),
            schedule,
            now,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        TestContext {
            ctx,
            ocr,
            user,
            caregiver,
            reminder,
        }
    }

    #[actix_web::test]
    async fn it_resolves_occurrence_and_advances_schedule() {
        let now = 1_700_000_000_000;
        let TestContext {
            ctx,
            user,
            caregiver,
            reminder,
            ..
        } = setup(now).await;

        let usecase = VerifyReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
            photo: vec![1, 2, 3],
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert!(res.schedule_advanced);
        assert_eq!(res.verification.match_status, MatchStatus::Match);
        assert_eq!(res.reminder.status, ReminderStatus::Pending);
        assert_eq!(res.reminder.last_taken_at, Some(now));
        assert!(res.reminder.next_scheduled > reminder.next_scheduled);

        let logs = ctx.repos.adherence_logs.find_by_user(&user.id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, ReminderStatus::Taken);
        assert_eq!(logs[0].scheduled_at, reminder.next_scheduled);

        let records = ctx.repos.verifications.find_by_reminder(&reminder.id).await;
        assert_eq!(records.len(), 1);

        // The caregiver heard about the confirmed intake
        let notifications = ctx
            .repos
            .notifications
            .find_by_recipient(&caregiver, true)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].notification_type,
            NotificationType::MedicineTaken
        );
    }

    #[actix_web::test]
    async fn mismatch_still_advances_the_schedule() {
        let now = 1_700_000_000_000;
        let TestContext {
            ctx,
            ocr,
            user,
            caregiver,
            reminder,
        } = setup(now).await;
        ocr.set_recognized_text("ibuprofen");

        let usecase = VerifyReminderUseCase {
            user_id: user.id,
            reminder_id: reminder.id.clone(),
            photo: vec![1, 2, 3],
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.verification.match_status, MatchStatus::Mismatch);
        assert!(res.schedule_advanced);

        let notifications = ctx
            .repos
            .notifications
            .find_by_recipient(&caregiver, true)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].notification_type,
            NotificationType::WrongMedicine
        );
    }

    #[actix_web::test]
    async fn ocr_failure_records_empty_text_instead_of_blocking() {
        let now = 1_700_000_000_000;
        let TestContext {
            ctx,
            ocr,
            user,
            reminder,
            ..
        } = setup(now).await;
        ocr.fail.store(true, Ordering::SeqCst);

        let usecase = VerifyReminderUseCase {
            user_id: user.id,
            reminder_id: reminder.id.clone(),
            photo: vec![1, 2, 3],
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert!(res.schedule_advanced);
        assert_eq!(res.verification.recognized_text, "");
        assert_eq!(res.verification.match_status, MatchStatus::Mismatch);
    }

    #[actix_web::test]
    async fn repeated_verification_resolves_one_occurrence_per_write() {
        let now = 1_700_000_000_000;
        let TestContext {
            ctx,
            user,
            reminder,
            ..
        } = setup(now).await;

        let first = VerifyReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
            photo: vec![1, 2, 3],
        };
        let first_res = execute(first, &ctx).await.unwrap();
        assert!(first_res.schedule_advanced);

        // A stale writer holding the original precondition loses the
        // conditional write: the occurrence cannot be resolved twice
        let stale = reminder.precondition();
        let mut resolved = reminder.clone();
        resolved.resolve_taken(now);
        let applied = ctx
            .repos
            .reminders
            .save_checked(&resolved, &stale)
            .await
            .unwrap();
        assert!(!applied);

        // A later verification resolves the NEXT occurrence, one adherence
        // entry each, and the audit trail stays append-only
        let second = VerifyReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
            photo: vec![1, 2, 3],
        };
        let second_res = execute(second, &ctx).await.unwrap();
        assert!(second_res.schedule_advanced);
        assert!(second_res.reminder.next_scheduled > first_res.reminder.next_scheduled);

        let logs = ctx.repos.adherence_logs.find_by_reminder(&reminder.id).await;
        assert_eq!(logs.len(), 2);
        let records = ctx.repos.verifications.find_by_reminder(&reminder.id).await;
        assert_eq!(records.len(), 2);
    }
}
