//! Backup schedule expansion.
//!
//! Each client walks the calendar from the global start date to its own
//! end date, one cadence step at a time, and emits one backup per visited
//! date. Weekend-blacked-out clients slide past Saturdays and Sundays one
//! day at a time without consuming a cadence step.
//!
//! RULES:
//!   - Each client draws only from its own stream (RngBank::for_client).
//!   - Backup ids are handed out in generation order (client, then date)
//!     by an explicit BackupSequence; the final stream is re-sorted by
//!     timestamp, so id order and row order differ.

use crate::{
    client::ClientRecord,
    config::{ScheduleConfig, WeekendBlackout, WindowPolicy},
    rng::{RngBank, StreamRng},
    types::{round2, BackupId, ClientId, TIMESTAMP_FORMAT},
};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Magnitude variation applied to a client's average size on success.
pub const SIZE_VARIATION: (f64, f64) = (0.8, 1.2);

/// Smallest size a successful backup reports; only failures carry 0.0.
pub const MIN_SUCCESS_GB: f64 = 0.01;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// 23:00–23:59
    Nightly,
    /// 01:00–03:59
    EarlyMorning,
    /// 22:00–23:59
    Evening,
}

impl TimeWindow {
    pub fn hours(&self) -> RangeInclusive<u32> {
        match self {
            Self::Nightly      => 23..=23,
            Self::EarlyMorning => 1..=3,
            Self::Evening      => 22..=23,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BackupOutcome {
    Success,
    Failed,
}

impl BackupOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed  => "failed",
        }
    }
}

impl fmt::Display for BackupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock length of a backup, rendered as `MM:SS`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupDuration {
    pub minutes: u32,
    pub seconds: u32,
}

impl fmt::Display for BackupDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupRecord {
    pub backup_id: BackupId,
    pub client_id: ClientId,
    pub client_name: String,
    pub started_at: NaiveDateTime,
    pub outcome: BackupOutcome,
    pub duration: BackupDuration,
    /// Zero iff `outcome` is `Failed`.
    pub size_gb: f64,
}

impl BackupRecord {
    /// Fixed-width `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp(&self) -> String {
        self.started_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Monotonic backup id counter, threaded through expansion.
#[derive(Debug, Clone)]
pub struct BackupSequence {
    next: u64,
    width: usize,
}

impl BackupSequence {
    pub fn new(width: usize) -> Self {
        Self { next: 1, width }
    }

    pub fn next_id(&mut self) -> BackupId {
        let id = format!("bkp_{:0width$}", self.next, width = self.width);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

/// How a client's backup hour is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowChoice {
    /// Every backup lands in the same window.
    Fixed(TimeWindow),
    /// Nightly, early-morning and evening weights, drawn per backup.
    Weighted([f64; 3]),
}

impl WindowChoice {
    fn pick(&self, rng: &mut StreamRng) -> TimeWindow {
        match self {
            Self::Fixed(window) => *window,
            Self::Weighted(weights) => match rng.weighted_index(weights) {
                0 => TimeWindow::Nightly,
                1 => TimeWindow::EarlyMorning,
                _ => TimeWindow::Evening,
            },
        }
    }
}

/// Per-client policy resolved once before the walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPolicy {
    pub end_date: NaiveDate,
    pub cadence_days: u64,
    pub skip_weekends: bool,
    pub window: WindowChoice,
}

impl ClientPolicy {
    pub fn resolve(client: &ClientRecord, config: &ScheduleConfig, rng: &mut StreamRng) -> Self {
        let skip_weekends = match &config.weekend_blackout {
            WeekendBlackout::None => false,
            WeekendBlackout::Clients { ids } => ids.contains(&client.client_id),
            WeekendBlackout::Fraction { share } => rng.chance(*share),
        };
        let window = match &config.windows {
            WindowPolicy::Assigned { by_status, overrides } => WindowChoice::Fixed(
                overrides
                    .get(&client.client_id)
                    .copied()
                    .unwrap_or_else(|| by_status.for_status(client.status)),
            ),
            WindowPolicy::Weighted { nightly, early_morning, evening } => {
                WindowChoice::Weighted([*nightly, *early_morning, *evening])
            }
        };
        Self {
            end_date: config.end_for(client.status),
            cadence_days: client.status.cadence_days(),
            skip_weekends,
            window,
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Expand one client into its backup history, in date order.
pub fn expand_client(
    client: &ClientRecord,
    config: &ScheduleConfig,
    rng: &mut StreamRng,
    sequence: &mut BackupSequence,
) -> Vec<BackupRecord> {
    let policy = ClientPolicy::resolve(client, config, rng);
    let cap = config.max_backups_per_client.map(|c| c as usize);
    let mut backups = Vec::new();
    let mut cursor = Some(config.start_date);

    while let Some(date) = cursor.filter(|d| *d <= policy.end_date) {
        if cap.is_some_and(|c| backups.len() >= c) {
            break;
        }
        if policy.skip_weekends && is_weekend(date) {
            cursor = date.checked_add_days(Days::new(1));
            continue;
        }

        let window = policy.window.pick(rng);
        let hour = rng.in_range(window.hours());
        let minute = rng.in_range(0..=59);
        let started_at = date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or(NaiveDateTime::MIN);

        let (outcome, size_gb, minutes) = if rng.chance(client.success_rate) {
            let factor = rng.uniform(SIZE_VARIATION.0, SIZE_VARIATION.1);
            let range = config.success_minutes;
            (
                BackupOutcome::Success,
                round2(client.avg_size_gb * factor).max(MIN_SUCCESS_GB),
                rng.in_range(range.min..=range.max),
            )
        } else {
            let range = config.failure_minutes;
            (BackupOutcome::Failed, 0.0, rng.in_range(range.min..=range.max))
        };
        let seconds = rng.in_range(0..=59);

        backups.push(BackupRecord {
            backup_id: sequence.next_id(),
            client_id: client.client_id.clone(),
            client_name: client.name.clone(),
            started_at,
            outcome,
            duration: BackupDuration { minutes, seconds },
            size_gb,
        });

        cursor = date.checked_add_days(Days::new(policy.cadence_days));
    }

    log::debug!(
        "schedule: {} {} -> {} backups (end {}, every {}d, skip_weekends={})",
        client.client_id,
        client.status,
        backups.len(),
        policy.end_date,
        policy.cadence_days,
        policy.skip_weekends
    );
    backups
}

/// Expand every client and return the stream sorted by timestamp.
/// The sort is stable, so same-minute backups keep generation order.
pub fn expand_all(
    clients: &[ClientRecord],
    config: &ScheduleConfig,
    bank: &RngBank,
) -> Vec<BackupRecord> {
    let mut sequence = BackupSequence::new(config.backup_id_width);
    let mut backups = Vec::new();
    for (index, client) in clients.iter().enumerate() {
        let mut rng = bank.for_client(index);
        backups.extend(expand_client(client, config, &mut rng, &mut sequence));
    }
    backups.sort_by_key(|b| b.started_at);
    log::info!(
        "schedule: {} backups for {} clients",
        sequence.issued(),
        clients.len()
    );
    backups
}
