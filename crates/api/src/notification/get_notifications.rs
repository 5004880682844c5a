use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::get_notifications::*;
use pillsync_domain::{Notification, ID};
use pillsync_infra::PillsyncContext;

pub async fn get_notifications_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = GetNotificationsUseCase {
        user_id: path_params.user_id.clone(),
        unread_only: query_params.unread_only.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user_id: ID,
    pub unread_only: bool,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let mut notifications = ctx
            .repos
            .notifications
            .find_by_recipient(&self.user_id, self.unread_only)
            .await;
        // Newest first
        notifications.sort_by_key(|notification| std::cmp::Reverse(notification.timestamp));
        Ok(notifications)
    }
}
