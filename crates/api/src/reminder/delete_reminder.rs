use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::delete_reminder::*;
use pillsync_domain::{Reminder, ID};
use pillsync_infra::PillsyncContext;

pub async fn delete_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = DeleteReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => (),
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        // Hard delete, no tombstone. Both trigger paths drop the reminder
        // from consideration on their next evaluation.
        ctx.repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_domain::{Frequency, ReminderSchedule, TimeOfDay, User};
    use pillsync_infra::setup_context;

    #[actix_web::test]
    async fn it_deletes_own_reminder_and_rejects_foreign_ones() {
        let ctx = setup_context();
        let user = User::new("Alice".into(), 0);
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
            0,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let foreign = DeleteReminderUseCase {
            user_id: ID::new(),
            reminder_id: reminder.id.clone(),
        };
        assert!(execute(foreign, &ctx).await.is_err());

        let own = DeleteReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
        };
        assert!(execute(own, &ctx).await.is_ok());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());

        // Deleting twice reports not found
        let again = DeleteReminderUseCase {
            user_id: user.id,
            reminder_id: reminder.id.clone(),
        };
        assert_eq!(
            execute(again, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(reminder.id)
        );
    }
}
