use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use pillsync_api_structs::create_reminder::*;
use pillsync_domain::{Frequency, Reminder, ReminderSchedule, TimeOfDay, ID};
use pillsync_infra::PillsyncContext;

pub async fn create_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: path_params.user_id.clone(),
        medicine_name: body.medicine_name,
        dosage: body.dosage,
        scheduled_time: body.scheduled_time,
        frequency: body.frequency,
        custom_days: body.custom_days.unwrap_or_default(),
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub medicine_name: String,
    pub dosage: String,
    pub scheduled_time: String,
    pub frequency: Frequency,
    pub custom_days: Vec<u32>,
    pub timezone: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMedicineName,
    EmptyDosage,
    InvalidScheduledTime(String),
    InvalidTimezone(String),
    InvalidSchedule(String),
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMedicineName => {
                Self::BadClientData("A medicine name is required".into())
            }
            UseCaseError::EmptyDosage => Self::BadClientData("A dosage is required".into()),
            UseCaseError::InvalidScheduledTime(time) => Self::BadClientData(format!(
                "Invalid scheduled time: {}, expected wall-clock HH:MM",
                time
            )),
            UseCaseError::InvalidTimezone(timezone) => {
                Self::BadClientData(format!("Invalid timezone: {}", timezone))
            }
            UseCaseError::InvalidSchedule(msg) => Self::BadClientData(msg),
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        if self.medicine_name.trim().is_empty() {
            return Err(UseCaseError::EmptyMedicineName);
        }
        if self.dosage.trim().is_empty() {
            return Err(UseCaseError::EmptyDosage);
        }

        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let time = self
            .scheduled_time
            .parse::<TimeOfDay>()
            .map_err(|_| UseCaseError::InvalidScheduledTime(self.scheduled_time.clone()))?;

        let timezone = match &self.timezone {
            Some(timezone) => timezone
                .parse::<Tz>()
                .map_err(|_| UseCaseError::InvalidTimezone(timezone.clone()))?,
            None => chrono_tz::UTC,
        };

        // An invalid schedule is rejected here and never persisted
        let schedule =
            ReminderSchedule::new(time, self.frequency, self.custom_days.clone(), timezone)
                .map_err(|e| UseCaseError::InvalidSchedule(e.to_string()))?;

        let reminder = Reminder::new(
            user.id,
            self.medicine_name.trim().to_string(),
            self.dosage.trim().to_string(),
            schedule,
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
