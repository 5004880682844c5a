use pillsync_domain::ReminderPolicy;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Due window, missed threshold and snooze duration for the reminder
    /// lifecycle. Policy constants, overridable through the environment.
    pub reminder_policy: ReminderPolicy,
    /// Endpoint of the push-notification gateway. When unset, push delivery
    /// is logged and skipped.
    pub push_gateway_url: Option<String>,
    /// Endpoint of the text-recognition service. When unset, verification
    /// proceeds as if no text was recognized.
    pub ocr_service_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                5000
            }
        };

        let reminder_policy = ReminderPolicy {
            due_window_millis: minutes_from_env("DUE_WINDOW_MINUTES", 2) * 60 * 1000,
            missed_threshold_millis: minutes_from_env("MISSED_THRESHOLD_MINUTES", 30) * 60 * 1000,
            snooze_millis: minutes_from_env("SNOOZE_MINUTES", 15) * 60 * 1000,
        };

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL").ok();
        if push_gateway_url.is_none() {
            info!("PUSH_GATEWAY_URL env var not set. Push deliveries will only be logged.");
        }
        let ocr_service_url = std::env::var("OCR_SERVICE_URL").ok();
        if ocr_service_url.is_none() {
            info!("OCR_SERVICE_URL env var not set. Photo verification will record empty text.");
        }

        Self {
            port,
            reminder_policy,
            push_gateway_url,
            ocr_service_url,
        }
    }
}

fn minutes_from_env(var: &str, default_minutes: i64) -> i64 {
    match std::env::var(var) {
        Ok(value) => match value.parse::<i64>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!(
                    "The given {}: {} is not a positive number of minutes, falling back to the default: {}.",
                    var, value, default_minutes
                );
                default_minutes
            }
        },
        Err(_) => default_minutes,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
