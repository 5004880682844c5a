use pillsync_domain::ID;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// Payload handed to the push-notification gateway. Delivery is always
/// best-effort: the persisted notification record is the source of truth.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn deliver(&self, recipient_id: &ID, message: &PushMessage) -> anyhow::Result<()>;
}

/// Delivers through an HTTP push gateway (e.g. an FCM relay)
pub struct HttpPushGateway {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpPushGateway {
    pub fn new(gateway_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequestBody<'a> {
    recipient_id: String,
    title: &'a str,
    body: &'a str,
    data: &'a HashMap<String, String>,
}

#[async_trait::async_trait]
impl IPushGateway for HttpPushGateway {
    async fn deliver(&self, recipient_id: &ID, message: &PushMessage) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.gateway_url)
            .json(&PushRequestBody {
                recipient_id: recipient_id.as_string(),
                title: &message.title,
                body: &message.body,
                data: &message.data,
            })
            .send()
            .await?;
        if !res.status().is_success() {
            anyhow::bail!(
                "Push gateway responded with status: {} for recipient: {}",
                res.status(),
                recipient_id
            );
        }
        Ok(())
    }
}

/// Used when no push gateway is configured
pub struct NoopPushGateway;

#[async_trait::async_trait]
impl IPushGateway for NoopPushGateway {
    async fn deliver(&self, recipient_id: &ID, message: &PushMessage) -> anyhow::Result<()> {
        info!(
            "Push delivery skipped (no gateway configured). Recipient: {}, title: {}",
            recipient_id, message.title
        );
        Ok(())
    }
}

/// Records deliveries and can be programmed to fail for given recipients
pub struct InMemoryPushGateway {
    pub deliveries: Mutex<Vec<(ID, PushMessage)>>,
    pub failing_recipients: Mutex<Vec<ID>>,
}

impl InMemoryPushGateway {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, recipient_id: ID) {
        self.failing_recipients.lock().unwrap().push(recipient_id);
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IPushGateway for InMemoryPushGateway {
    async fn deliver(&self, recipient_id: &ID, message: &PushMessage) -> anyhow::Result<()> {
        if self
            .failing_recipients
            .lock()
            .unwrap()
            .contains(recipient_id)
        {
            anyhow::bail!("Push delivery failed for recipient: {}", recipient_id);
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((recipient_id.clone(), message.clone()));
        Ok(())
    }
}
