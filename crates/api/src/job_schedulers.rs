use crate::reminder::monitor_reminders::{MonitorRemindersUseCase, MonitorTrigger};
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use pillsync_infra::PillsyncContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// The in-process half of the dual trigger: while the server is up, every
/// unresolved reminder is re-evaluated once a minute, aligned to the start
/// of the minute. The external sweep endpoint runs the same evaluation, and
/// the two reconcile through the conditional writes rather than any shared
/// state in here.
pub fn start_reminder_evaluation_job(ctx: PillsyncContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            let usecase = MonitorRemindersUseCase {
                trigger: MonitorTrigger::SessionTimer,
            };
            if let Ok(report) = execute(usecase, &ctx).await {
                if report.processed > 0 {
                    info!(
                        "Reminder evaluation tick processed: {} reminders, sent: {} due alerts",
                        report.processed, report.alerts_sent
                    );
                }
            }
        }
    });
}
