use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::create_user::*;
use pillsync_domain::User;
use pillsync_infra::PillsyncContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = CreateUserUseCase { name: body.0.name };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(PillsyncError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub name: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("A name is required".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let user = User::new(
            self.name.trim().to_string(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_infra::setup_context;

    #[actix_web::test]
    async fn it_creates_user_with_share_code() {
        let ctx = setup_context();
        let usecase = CreateUserUseCase {
            name: "Alice".into(),
        };
        let user = execute(usecase, &ctx).await.unwrap();
        assert!(!user.share_code.is_empty());
        assert!(ctx.repos.users.find(&user.id).await.is_some());
    }

    #[actix_web::test]
    async fn it_rejects_blank_name() {
        let ctx = setup_context();
        let usecase = CreateUserUseCase { name: " ".into() };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::EmptyName
        );
    }
}
