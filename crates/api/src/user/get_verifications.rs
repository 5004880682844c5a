use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::get_verifications::*;
use pillsync_domain::{VerificationRecord, ID};
use pillsync_infra::PillsyncContext;

pub async fn get_verifications_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = GetVerificationsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|verifications| HttpResponse::Ok().json(APIResponse::new(verifications)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct GetVerificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetVerificationsUseCase {
    type Response = Vec<VerificationRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetVerifications";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let mut verifications = ctx.repos.verifications.find_by_user(&self.user_id).await;
        // Newest first
        verifications.sort_by_key(|record| std::cmp::Reverse(record.timestamp));
        Ok(verifications)
    }
}
