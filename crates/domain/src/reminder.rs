use crate::recurrence;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Wall-clock time of day at which a dose is scheduled, interpreted in
/// the timezone of the owning `ReminderSchedule`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl std::cmp::PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.hours.cmp(&other.hours) {
            std::cmp::Ordering::Less => return Some(std::cmp::Ordering::Less),
            std::cmp::Ordering::Greater => return Some(std::cmp::Ordering::Greater),
            _ => (),
        };

        Some(self.minutes.cmp(&other.minutes))
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeOfDayError {
    #[error("Time of day: {0} is malformed, expected HH:MM")]
    Malformed(String),
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeOfDayError::Malformed(s.to_string());
        let mut parts = s.split(':');
        let hours = parts
            .next()
            .and_then(|h| h.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let minutes = parts
            .next()
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() || hours > 23 || minutes > 59 {
            return Err(malformed());
        }
        Ok(Self { hours, minutes })
    }
}

/// How often a dose recurs. `Custom` is a set of weekday indices with
/// 0 = Sunday, matching the wire format used by clients.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "alternate-days")]
    AlternateDays,
    #[serde(rename = "custom")]
    Custom,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidScheduleError {
    #[error("Custom frequency requires a non-empty set of weekdays")]
    EmptyCustomDays,
    #[error("Weekday index: {0} is out of range, expected 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday(u32),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub time: TimeOfDay,
    pub frequency: Frequency,
    /// Weekday indices (0 = Sunday), non-empty iff `frequency` is `Custom`
    pub custom_days: Vec<u32>,
    pub timezone: Tz,
}

impl ReminderSchedule {
    pub fn new(
        time: TimeOfDay,
        frequency: Frequency,
        custom_days: Vec<u32>,
        timezone: Tz,
    ) -> Result<Self, InvalidScheduleError> {
        let mut custom_days = match frequency {
            Frequency::Custom => {
                if custom_days.is_empty() {
                    return Err(InvalidScheduleError::EmptyCustomDays);
                }
                custom_days
            }
            _ => Vec::new(),
        };
        if let Some(day) = custom_days.iter().find(|d| **d > 6) {
            return Err(InvalidScheduleError::InvalidWeekday(*day));
        }
        custom_days.sort_unstable();
        custom_days.dedup();

        Ok(Self {
            time,
            frequency,
            custom_days,
            timezone,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Snoozed,
    Taken,
    Missed,
}

/// Policy constants governing the occurrence lifecycle. These are
/// configuration, not per-medicine values.
#[derive(Debug, Clone, Copy)]
pub struct ReminderPolicy {
    /// Tolerance around `next_scheduled` during which a reminder is due
    pub due_window_millis: i64,
    /// How far past `next_scheduled` an unresolved occurrence is escalated as missed
    pub missed_threshold_millis: i64,
    /// How long a snooze defers the alert
    pub snooze_millis: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            due_window_millis: 2 * 60 * 1000,
            missed_threshold_millis: 30 * 60 * 1000,
            snooze_millis: 15 * 60 * 1000,
        }
    }
}

/// Outcome of evaluating one reminder against wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceCheck {
    /// Not actionable yet (or past the due window but not yet missed)
    Upcoming,
    /// Within the due window, or a snooze has expired: surface an alert
    Due,
    /// Past the missed threshold: escalate
    Missed,
    /// Snoozed and the snooze has not expired yet
    Snoozed,
}

/// Snapshot of the fields every lifecycle transition is conditioned on.
/// Both trigger paths write through a compare-and-set keyed on this value,
/// which is what keeps concurrent evaluations from double-firing.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrencePrecondition {
    pub status: ReminderStatus,
    pub next_scheduled: i64,
}

/// A `Reminder` is the recurring dose policy for one medicine. Each cycle
/// through the state machine resolves one occurrence (one day's dose) and
/// re-arms the reminder for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub medicine_name: String,
    pub dosage: String,
    pub schedule: ReminderSchedule,
    pub status: ReminderStatus,
    /// The next unresolved occurrence as an absolute timestamp in millis
    pub next_scheduled: i64,
    /// Present iff `status` is `Snoozed`
    pub snoozed_until: Option<i64>,
    pub last_taken_at: Option<i64>,
    pub created_at: i64,
}

impl Reminder {
    pub fn new(
        user_id: ID,
        medicine_name: String,
        dosage: String,
        schedule: ReminderSchedule,
        now: i64,
    ) -> Self {
        let next_scheduled = recurrence::next_occurrence(&schedule, now);
        Self {
            id: Default::default(),
            user_id,
            medicine_name,
            dosage,
            schedule,
            status: ReminderStatus::Pending,
            next_scheduled,
            snoozed_until: None,
            last_taken_at: None,
            created_at: now,
        }
    }

    /// Whether the current occurrence still awaits a resolution
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self.status,
            ReminderStatus::Pending | ReminderStatus::Snoozed
        )
    }

    pub fn precondition(&self) -> OccurrencePrecondition {
        OccurrencePrecondition {
            status: self.status,
            next_scheduled: self.next_scheduled,
        }
    }

    pub fn check_occurrence(&self, now: i64, policy: &ReminderPolicy) -> OccurrenceCheck {
        match self.status {
            ReminderStatus::Snoozed => match self.snoozed_until {
                // An expired snooze re-surfaces the same occurrence
                Some(snoozed_until) if now >= snoozed_until => OccurrenceCheck::Due,
                _ => OccurrenceCheck::Snoozed,
            },
            ReminderStatus::Pending => {
                let delta = now - self.next_scheduled;
                if delta.abs() <= policy.due_window_millis {
                    OccurrenceCheck::Due
                } else if delta > policy.missed_threshold_millis {
                    OccurrenceCheck::Missed
                } else {
                    OccurrenceCheck::Upcoming
                }
            }
            _ => OccurrenceCheck::Upcoming,
        }
    }

    pub fn snooze(&mut self, now: i64, policy: &ReminderPolicy) {
        self.status = ReminderStatus::Snoozed;
        self.snoozed_until = Some(now + policy.snooze_millis);
    }

    /// Resolves the current occurrence as taken and re-arms the reminder
    /// for the next one.
    pub fn resolve_taken(&mut self, now: i64) {
        self.last_taken_at = Some(now);
        self.resolve(now);
    }

    /// Resolves the current occurrence as missed and re-arms the reminder
    /// for the next one. Escalation side effects belong to the caller.
    pub fn resolve_missed(&mut self, now: i64) {
        self.resolve(now);
    }

    fn resolve(&mut self, now: i64) {
        // Anchor the advance at the occurrence being resolved: an early
        // verification must not re-arm the occurrence it just closed
        let reference = self.next_scheduled.max(now);
        self.next_scheduled = recurrence::next_occurrence(&self.schedule, reference);
        self.snoozed_until = None;
        self.status = ReminderStatus::Pending;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn daily_schedule(hours: u32, minutes: u32) -> ReminderSchedule {
        ReminderSchedule::new(
            TimeOfDay { hours, minutes },
            Frequency::Daily,
            Vec::new(),
            chrono_tz::UTC,
        )
        .expect("Valid schedule")
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("Valid timestamp")
            .timestamp_millis()
    }

    #[test]
    fn it_parses_time_of_day() {
        assert_eq!(
            "09:00".parse::<TimeOfDay>(),
            Ok(TimeOfDay {
                hours: 9,
                minutes: 0
            })
        );
        assert_eq!(
            "23:59".parse::<TimeOfDay>(),
            Ok(TimeOfDay {
                hours: 23,
                minutes: 59
            })
        );
        for malformed in ["24:00", "09:60", "09", "09:00:00", "9am", ""] {
            assert!(malformed.parse::<TimeOfDay>().is_err(), "{}", malformed);
        }
    }

    #[test]
    fn it_rejects_empty_custom_days() {
        let res = ReminderSchedule::new(
            TimeOfDay {
                hours: 9,
                minutes: 0,
            },
            Frequency::Custom,
            Vec::new(),
            chrono_tz::UTC,
        );
        assert_eq!(res.unwrap_err(), InvalidScheduleError::EmptyCustomDays);
    }

    #[test]
    fn it_rejects_out_of_range_weekday() {
        let res = ReminderSchedule::new(
            TimeOfDay {
                hours: 9,
                minutes: 0,
            },
            Frequency::Custom,
            vec![1, 7],
            chrono_tz::UTC,
        );
        assert_eq!(res.unwrap_err(), InvalidScheduleError::InvalidWeekday(7));
    }

    #[test]
    fn it_ignores_custom_days_for_daily_frequency() {
        let schedule = ReminderSchedule::new(
            TimeOfDay {
                hours: 9,
                minutes: 0,
            },
            Frequency::Daily,
            vec![1, 3],
            chrono_tz::UTC,
        )
        .expect("Valid schedule");
        assert!(schedule.custom_days.is_empty());
    }

    fn pending_reminder(next_scheduled: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: Default::default(),
            medicine_name: "Paracetamol".into(),
            dosage: "500mg".into(),
            schedule: daily_schedule(9, 0),
            status: ReminderStatus::Pending,
            next_scheduled,
            snoozed_until: None,
            last_taken_at: None,
            created_at: 0,
        }
    }

    #[test]
    fn it_reports_due_within_tolerance_window() {
        let policy = ReminderPolicy::default();
        let scheduled = ts(2024, 1, 1, 9, 0);
        let reminder = pending_reminder(scheduled);

        assert_eq!(
            reminder.check_occurrence(scheduled, &policy),
            OccurrenceCheck::Due
        );
        assert_eq!(
            reminder.check_occurrence(scheduled - 2 * 60 * 1000, &policy),
            OccurrenceCheck::Due
        );
        assert_eq!(
            reminder.check_occurrence(scheduled + 2 * 60 * 1000, &policy),
            OccurrenceCheck::Due
        );
        assert_eq!(
            reminder.check_occurrence(scheduled - 3 * 60 * 1000, &policy),
            OccurrenceCheck::Upcoming
        );
        // Past the window but before the missed threshold: no action
        assert_eq!(
            reminder.check_occurrence(scheduled + 10 * 60 * 1000, &policy),
            OccurrenceCheck::Upcoming
        );
    }

    #[test]
    fn it_reports_missed_past_threshold() {
        let policy = ReminderPolicy::default();
        let scheduled = ts(2024, 1, 1, 9, 0);
        let reminder = pending_reminder(scheduled);

        assert_eq!(
            reminder.check_occurrence(scheduled + 30 * 60 * 1000, &policy),
            OccurrenceCheck::Upcoming
        );
        assert_eq!(
            reminder.check_occurrence(scheduled + 31 * 60 * 1000, &policy),
            OccurrenceCheck::Missed
        );
    }

    #[test]
    fn it_snoozes_and_resurfaces_same_occurrence() {
        let policy = ReminderPolicy::default();
        let scheduled = ts(2024, 1, 1, 9, 0);
        let mut reminder = pending_reminder(scheduled);

        reminder.snooze(scheduled, &policy);
        assert_eq!(reminder.status, ReminderStatus::Snoozed);
        assert_eq!(reminder.snoozed_until, Some(scheduled + 15 * 60 * 1000));
        assert_eq!(
            reminder.check_occurrence(scheduled + 5 * 60 * 1000, &policy),
            OccurrenceCheck::Snoozed
        );
        assert_eq!(
            reminder.check_occurrence(scheduled + 15 * 60 * 1000, &policy),
            OccurrenceCheck::Due
        );
        // Still the same occurrence
        assert_eq!(reminder.next_scheduled, scheduled);
    }

    #[test]
    fn it_advances_schedule_when_resolved_taken() {
        let scheduled = ts(2024, 1, 1, 9, 0);
        let now = scheduled + 60 * 1000;
        let mut reminder = pending_reminder(scheduled);

        reminder.resolve_taken(now);
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.last_taken_at, Some(now));
        assert_eq!(reminder.snoozed_until, None);
        assert_eq!(reminder.next_scheduled, ts(2024, 1, 2, 9, 0));
    }

    #[test]
    fn early_resolution_never_rearms_the_same_occurrence() {
        let scheduled = ts(2024, 1, 1, 9, 0);
        // Verified 8:00, an hour before the dose was due
        let now = ts(2024, 1, 1, 8, 0);
        let mut reminder = pending_reminder(scheduled);

        reminder.resolve_taken(now);
        assert_eq!(reminder.next_scheduled, ts(2024, 1, 2, 9, 0));
    }

    #[test]
    fn it_advances_schedule_when_resolved_missed() {
        let scheduled = ts(2024, 1, 1, 9, 0);
        let now = scheduled + 31 * 60 * 1000;
        let mut reminder = pending_reminder(scheduled);

        reminder.resolve_missed(now);
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.last_taken_at, None);
        assert_eq!(reminder.next_scheduled, ts(2024, 1, 2, 9, 0));
    }

    #[test]
    fn it_seeds_first_occurrence_on_creation() {
        let now = ts(2024, 1, 1, 8, 0);
        let reminder = Reminder::new(
            Default::default(),
            "Paracetamol".into(),
            "500mg".into(),
            daily_schedule(9, 0),
            now,
        );
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.next_scheduled, ts(2024, 1, 1, 9, 0));
    }
}
