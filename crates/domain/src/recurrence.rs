use crate::reminder::{Frequency, ReminderSchedule};
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Computes the next occurrence of `schedule` at or after `reference_millis`,
/// as an absolute timestamp in millis.
///
/// - `Daily`: the reference date at the scheduled time, rolled forward one
///   day when that instant has already passed.
/// - `AlternateDays`: two calendar days after the reference occurrence. The
///   cadence is anchored to the occurrence being resolved, not to calendar
///   parity.
/// - `Custom`: today when today's weekday is in the set and the scheduled
///   time has not yet passed; otherwise the next listed weekday, wrapping
///   into next week.
pub fn next_occurrence(schedule: &ReminderSchedule, reference_millis: i64) -> i64 {
    let tz = &schedule.timezone;
    let reference = instant_in(tz, reference_millis);
    let today = reference.date_naive();

    match schedule.frequency {
        Frequency::Daily => {
            let candidate = occurrence_on(today, schedule);
            if candidate > reference_millis {
                candidate
            } else {
                occurrence_on(today + Duration::days(1), schedule)
            }
        }
        Frequency::AlternateDays => occurrence_on(today + Duration::days(2), schedule),
        Frequency::Custom => {
            let weekday = reference.weekday().num_days_from_sunday();
            if schedule.custom_days.contains(&weekday) {
                let candidate = occurrence_on(today, schedule);
                if candidate > reference_millis {
                    return candidate;
                }
            }

            // custom_days is sorted at construction: the next scheduled
            // weekday is the smallest index after today, wrapping to the
            // smallest index next week.
            let next_weekday = schedule
                .custom_days
                .iter()
                .find(|d| **d > weekday)
                .or_else(|| schedule.custom_days.first())
                .copied()
                .unwrap_or(weekday);
            let offset = if next_weekday > weekday {
                next_weekday - weekday
            } else {
                7 - weekday + next_weekday
            };
            occurrence_on(today + Duration::days(offset as i64), schedule)
        }
    }
}

fn instant_in(tz: &Tz, millis: i64) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(tz)
}

fn occurrence_on(date: NaiveDate, schedule: &ReminderSchedule) -> i64 {
    let naive = date.and_time(schedule.time.as_naive_time());
    let tz = &schedule.timezone;
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        // DST transition backwards: take the earlier offset
        LocalResult::Ambiguous(earliest, _) => earliest,
        // DST transition forwards: the wall-clock time does not exist, fall
        // forward one hour
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => tz.from_utc_datetime(&naive),
        },
    };
    local.timestamp_millis()
}
