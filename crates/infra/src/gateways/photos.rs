use std::sync::Mutex;
use uuid::Uuid;

/// Blob storage for verification photos. Only the opaque reference is kept
/// on the verification record.
#[async_trait::async_trait]
pub trait IPhotoStorage: Send + Sync {
    async fn upload(&self, image: &[u8]) -> anyhow::Result<String>;
}

pub struct InMemoryPhotoStorage {
    photos: Mutex<Vec<(String, Vec<u8>)>>,
}

impl InMemoryPhotoStorage {
    pub fn new() -> Self {
        Self {
            photos: Mutex::new(Vec::new()),
        }
    }

    pub fn photo_count(&self) -> usize {
        self.photos.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IPhotoStorage for InMemoryPhotoStorage {
    async fn upload(&self, image: &[u8]) -> anyhow::Result<String> {
        let reference = format!("photos/{}", Uuid::new_v4());
        self.photos
            .lock()
            .unwrap()
            .push((reference.clone(), image.to_vec()));
        Ok(reference)
    }
}
