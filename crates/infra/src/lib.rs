mod config;
mod gateways;
mod repos;
mod system;

pub use config::Config;
pub use gateways::{
    Gateways, HttpOcrGateway, HttpPushGateway, InMemoryOcrGateway, InMemoryPhotoStorage,
    InMemoryPushGateway, IOcrGateway, IPhotoStorage, IPushGateway, NoopOcrGateway,
    NoopPushGateway, PushMessage,
};
pub use repos::{
    IAdherenceLogRepo, INotificationRepo, IReminderRepo, IUserRepo, IVerificationRepo, Repos,
};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct PillsyncContext {
    pub repos: Repos,
    pub gateways: Gateways,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> PillsyncContext {
    let config = Config::new();
    let gateways = Gateways::create(&config);
    PillsyncContext {
        repos: Repos::create_inmemory(),
        gateways,
        config,
        sys: Arc::new(RealSys {}),
    }
}
