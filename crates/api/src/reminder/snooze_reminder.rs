use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::snooze_reminder::*;
use pillsync_domain::{Reminder, ID};
use pillsync_infra::PillsyncContext;

pub async fn snooze_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = SnoozeReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(PillsyncError::from)
}

/// Defers the current occurrence without advancing the schedule. The write
/// is conditioned on the state the user saw; if an evaluation resolved the
/// occurrence in between, the snooze is rejected instead of clobbering it.
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Conflict,
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::Conflict => Self::Conflict(
                "The reminder was updated while snoozing it. Please refresh and retry.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let precondition = reminder.precondition();
        let mut snoozed = reminder;
        snoozed.snooze(
            ctx.sys.get_timestamp_millis(),
            &ctx.config.reminder_policy,
        );

        let applied = ctx
            .repos
            .reminders
            .save_checked(&snoozed, &precondition)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !applied {
            return Err(UseCaseError::Conflict);
        }

        Ok(snoozed)
    }
}
