use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Text recognition over a photographed medicine label. Failures are treated
/// by callers as "no text recognized", never as a hard error blocking
/// verification.
#[async_trait::async_trait]
pub trait IOcrGateway: Send + Sync {
    async fn recognize_text(&self, image: &[u8]) -> anyhow::Result<String>;
}

/// Posts the image to an HTTP text-recognition service and returns the raw
/// recognized text body
pub struct HttpOcrGateway {
    client: reqwest::Client,
    service_url: String,
}

impl HttpOcrGateway {
    pub fn new(service_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            service_url,
        }
    }
}

#[async_trait::async_trait]
impl IOcrGateway for HttpOcrGateway {
    async fn recognize_text(&self, image: &[u8]) -> anyhow::Result<String> {
        let res = self
            .client
            .post(&self.service_url)
            .body(image.to_vec())
            .send()
            .await?;
        if !res.status().is_success() {
            anyhow::bail!("OCR service responded with status: {}", res.status());
        }
        Ok(res.text().await?)
    }
}

/// Used when no OCR service is configured: verification proceeds with empty
/// recognized text
pub struct NoopOcrGateway;

#[async_trait::async_trait]
impl IOcrGateway for NoopOcrGateway {
    async fn recognize_text(&self, _image: &[u8]) -> anyhow::Result<String> {
        info!("Text recognition skipped (no OCR service configured)");
        Ok(String::new())
    }
}

pub struct InMemoryOcrGateway {
    pub recognized_text: Mutex<String>,
    pub fail: AtomicBool,
}

impl InMemoryOcrGateway {
    pub fn new(recognized_text: &str) -> Self {
        Self {
            recognized_text: Mutex::new(recognized_text.to_string()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_recognized_text(&self, text: &str) {
        *self.recognized_text.lock().unwrap() = text.to_string();
    }
}

#[async_trait::async_trait]
impl IOcrGateway for InMemoryOcrGateway {
    async fn recognize_text(&self, _image: &[u8]) -> anyhow::Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("OCR service timed out");
        }
        Ok(self.recognized_text.lock().unwrap().clone())
    }
}
