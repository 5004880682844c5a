use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::get_adherence_log::*;
use pillsync_domain::{AdherenceLog, ID};
use pillsync_infra::PillsyncContext;

pub async fn get_adherence_log_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = GetAdherenceLogUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|logs| HttpResponse::Ok().json(APIResponse::new(logs)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct GetAdherenceLogUseCase {
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
impl UseCase for GetAdherenceLogUseCase {
    type Response = Vec<AdherenceLog>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAdherenceLog";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let mut logs = ctx.repos.adherence_logs.find_by_user(&self.user_id).await;
        // Newest first
        logs.sort_by_key(|log| std::cmp::Reverse(log.timestamp));
        Ok(logs)
    }
}
