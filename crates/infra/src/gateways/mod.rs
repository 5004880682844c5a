mod ocr;
mod photos;
mod push;

use crate::Config;
pub use ocr::{HttpOcrGateway, InMemoryOcrGateway, IOcrGateway, NoopOcrGateway};
pub use photos::{InMemoryPhotoStorage, IPhotoStorage};
pub use push::{HttpPushGateway, InMemoryPushGateway, IPushGateway, NoopPushGateway, PushMessage};
use std::sync::Arc;

/// The external collaborators the engine talks to besides the document
/// store. All of them are best-effort from the engine's point of view.
#[derive(Clone)]
pub struct Gateways {
    pub push: Arc<dyn IPushGateway>,
    pub ocr: Arc<dyn IOcrGateway>,
    pub photos: Arc<dyn IPhotoStorage>,
}

impl Gateways {
    pub fn create(config: &Config) -> Self {
        let push: Arc<dyn IPushGateway> = match &config.push_gateway_url {
            Some(url) => Arc::new(HttpPushGateway::new(url.clone())),
            None => Arc::new(NoopPushGateway),
        };
        let ocr: Arc<dyn IOcrGateway> = match &config.ocr_service_url {
            Some(url) => Arc::new(HttpOcrGateway::new(url.clone())),
            None => Arc::new(NoopOcrGateway),
        };

        Self {
            push,
            ocr,
            photos: Arc::new(InMemoryPhotoStorage::new()),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            push: Arc::new(InMemoryPushGateway::new()),
            ocr: Arc::new(InMemoryOcrGateway::new("")),
            photos: Arc::new(InMemoryPhotoStorage::new()),
        }
    }
}
