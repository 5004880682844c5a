use crate::error::PillsyncError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillsync_api_structs::connect_caregiver::*;
use pillsync_domain::{User, ID};
use pillsync_infra::PillsyncContext;

pub async fn connect_caregiver_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PillsyncContext>,
) -> Result<HttpResponse, PillsyncError> {
    let usecase = ConnectCaregiverUseCase {
        caregiver_id: path_params.caregiver_id.clone(),
        share_code: body.0.share_code,
    };

    execute(usecase, &ctx)
        .await
        .map(|patient| HttpResponse::Ok().json(APIResponse::new(patient)))
        .map_err(PillsyncError::from)
}

/// Links a caregiver to the patient identified by a share code. Linking is
/// idempotent; the caregiver set lives on the patient profile and is read
/// back at every fan-out.
#[derive(Debug)]
pub struct ConnectCaregiverUseCase {
    pub caregiver_id: ID,
    pub share_code: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    CaregiverNotFound(ID),
    InvalidShareCode,
    SelfLink,
    StorageError,
}

impl From<UseCaseError> for PillsyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::CaregiverNotFound(caregiver_id) => Self::NotFound(format!(
                "The user with id: {}, was not found.",
                caregiver_id
            )),
            UseCaseError::InvalidShareCode => {
                Self::NotFound("No patient matches the given share code".into())
            }
            UseCaseError::SelfLink => {
                Self::BadClientData("A patient cannot be their own caregiver".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ConnectCaregiverUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "ConnectCaregiver";

    async fn execute(&mut self, ctx: &PillsyncContext) -> Result<Self::Response, Self::Error> {
        let caregiver = ctx
            .repos
            .users
            .find(&self.caregiver_id)
            .await
            .ok_or_else(|| UseCaseError::CaregiverNotFound(self.caregiver_id.clone()))?;

        let patient = ctx
            .repos
            .users
            .find_by_share_code(&self.share_code)
            .await
            .ok_or(UseCaseError::InvalidShareCode)?;

        if patient.id == caregiver.id {
            return Err(UseCaseError::SelfLink);
        }

        ctx.repos
            .users
            .add_caregiver(&patient.id, &caregiver.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .users
            .find(&patient.id)
            .await
            .ok_or(UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillsync_infra::setup_context;

    #[actix_web::test]
    async fn it_links_caregiver_through_share_code() {
        let ctx = setup_context();
        let patient = User::new("Alice".into(), 0);
        let caregiver = User::new("Bob".into(), 0);
        ctx.repos.users.insert(&patient).await.unwrap();
        ctx.repos.users.insert(&caregiver).await.unwrap();

        let usecase = ConnectCaregiverUseCase {
            caregiver_id: caregiver.id.clone(),
            share_code: patient.share_code.clone(),
        };
        let linked = execute(usecase, &ctx).await.unwrap();
        assert_eq!(linked.caregivers, vec![caregiver.id.clone()]);

        // Linking again stays idempotent
        let usecase = ConnectCaregiverUseCase {
            caregiver_id: caregiver.id.clone(),
            share_code: patient.share_code,
        };
        let linked = execute(usecase, &ctx).await.unwrap();
        assert_eq!(linked.caregivers.len(), 1);
    }

    #[actix_web::test]
    async fn it_rejects_unknown_share_code() {
        let ctx = setup_context();
        let caregiver = User::new("Bob".into(), 0);
        ctx.repos.users.insert(&caregiver).await.unwrap();

        let usecase = ConnectCaregiverUseCase {
            caregiver_id: caregiver.id,
            share_code: "nope".into(),
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidShareCode
        );
    }

    #[actix_web::test]
    async fn it_rejects_linking_to_oneself() {
        let ctx = setup_context();
        let patient = User::new("Alice".into(), 0);
        ctx.repos.users.insert(&patient).await.unwrap();

        let usecase = ConnectCaregiverUseCase {
            caregiver_id: patient.id.clone(),
            share_code: patient.share_code,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::SelfLink
        );
    }
}
