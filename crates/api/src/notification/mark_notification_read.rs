use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::mark_notification_read::*;
use pillsync_domain::{Notification, ID};
use pillsync_infra::PillsyncContext;

pub async fn mark_notification_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = MarkNotificationReadUseCase {
        user_id: path_params.user_id.clone(),
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found among your notifications.",
                notification_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let marked = ctx
            .repos
            .notifications
            .mark_read(&self.notification_id, &self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !marked {
            return Err(UseCaseError::NotFound(self.notification_id.clone()));
        }

        ctx.repos
            .notifications
            .find(&self.notification_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_domain::{NotificationPriority, NotificationType};
    use pillsync_infra::setup_context;

    #[actix_web::test]
    async fn only_the_recipient_marks_their_notification_read() {
        let ctx = setup_context();
        let recipient = ID::new();
        let notification = Notification::new(
            NotificationType::ReminderDue,
            recipient.clone(),
            ID::new(),
            "Time to take your medicine".into(),
            "It's time to take Paracetamol (500mg)".into(),
            NotificationPriority::High,
            0,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let intruder = MarkNotificationReadUseCase {
            user_id: ID::new(),
            notification_id: notification.id.clone(),
        };
        assert!(execute(intruder, &ctx).await.is_err());

        let recipient_request = MarkNotificationReadUseCase {
            user_id: recipient,
            notification_id: notification.id.clone(),
        };
        let marked = execute(recipient_request, &ctx).await.unwrap();
        assert!(marked.read);
    }
}
