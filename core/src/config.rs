use crate::{
    client::{ClientSeed, ClientStatus},
    error::{GenError, GenResult},
    schedule::{TimeWindow, MIN_SUCCESS_GB},
    types::ClientId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// A closed `[min, max]` band of real values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, what: &str) -> GenResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(GenError::invalid(format!(
                "{what}: band [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// A closed `[min, max]` range of whole minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinuteRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusWeights {
    pub active: f64,
    pub inactive: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuccessBands {
    pub active: Band,
    pub inactive: Band,
    pub pending: Band,
}

impl SuccessBands {
    pub fn for_status(&self, status: ClientStatus) -> Band {
        match status {
            ClientStatus::Active   => self.active,
            ClientStatus::Inactive => self.inactive,
            ClientStatus::Pending  => self.pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulationConfig {
    /// Number of clients to draw. Ignored when `roster` is non-empty.
    pub client_count: usize,
    /// Fixed, hand-written clients used instead of drawn ones.
    #[serde(default)]
    pub roster: Vec<ClientSeed>,
    pub status_weights: StatusWeights,
    pub success_bands: SuccessBands,
    pub avg_size_gb: Band,
    #[serde(default = "default_client_id_width")]
    pub client_id_width: usize,
}

/// Which clients never run on Saturdays and Sundays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WeekendBlackout {
    None,
    /// Exactly these clients skip weekends.
    Clients { ids: Vec<ClientId> },
    /// Each client skips weekends with probability `share`,
    /// decided once from the client's own stream.
    Fraction { share: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusWindows {
    pub active: TimeWindow,
    pub inactive: TimeWindow,
    pub pending: TimeWindow,
}

impl StatusWindows {
    pub fn for_status(&self, status: ClientStatus) -> TimeWindow {
        match status {
            ClientStatus::Active   => self.active,
            ClientStatus::Inactive => self.inactive,
            ClientStatus::Pending  => self.pending,
        }
    }
}

/// How each backup's time-of-day window is chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Fixed window per client: explicit override, else by status.
    Assigned {
        by_status: StatusWindows,
        #[serde(default)]
        overrides: BTreeMap<ClientId, TimeWindow>,
    },
    /// Window drawn per backup from relative weights.
    Weighted {
        nightly: f64,
        early_morning: f64,
        evening: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inactive clients stop here (clamped to `end_date`).
    pub inactive_end_date: NaiveDate,
    /// Optional cap on backups per client.
    #[serde(default)]
    pub max_backups_per_client: Option<u32>,
    pub weekend_blackout: WeekendBlackout,
    pub windows: WindowPolicy,
    pub success_minutes: MinuteRange,
    pub failure_minutes: MinuteRange,
    #[serde(default = "default_backup_id_width")]
    pub backup_id_width: usize,
}

impl ScheduleConfig {
    /// Last date a client with `status` may back up on.
    pub fn end_for(&self, status: ClientStatus) -> NaiveDate {
        match status {
            ClientStatus::Inactive => self.inactive_end_date.min(self.end_date),
            ClientStatus::Active | ClientStatus::Pending => self.end_date,
        }
    }
}

/// Static presentation fields merged into every client row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationConfig {
    pub join_date: NaiveDate,
    pub logo: String,
    pub retention_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub clients_path: PathBuf,
    pub backups_path: PathBuf,
}

impl OutputConfig {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            clients_path: dir.join("clients.csv"),
            backups_path: dir.join("backup.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub population: PopulationConfig,
    pub schedule: ScheduleConfig,
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_client_id_width() -> usize {
    3
}

fn default_backup_id_width() -> usize {
    6
}

// Evaluated at compile time through the consts below, so a bad literal
// fails the build instead of reaching a run.
const fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

const LARGE_START: NaiveDate = ymd(2023, 1, 1);
const LARGE_END: NaiveDate = ymd(2024, 2, 5);
const LARGE_INACTIVE_END: NaiveDate = ymd(2023, 7, 20);
const JOIN_DATE: NaiveDate = ymd(2023, 1, 15);
const TEST_END: NaiveDate = ymd(2023, 3, 31);
const TEST_INACTIVE_END: NaiveDate = ymd(2023, 2, 15);

impl GeneratorConfig {
    /// Load a JSON configuration file and validate it.
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The 500-client, 400-day dataset.
    pub fn large() -> Self {
        Self {
            seed: 42,
            population: PopulationConfig {
                client_count: 500,
                roster: Vec::new(),
                status_weights: StatusWeights { active: 0.8, inactive: 0.1, pending: 0.1 },
                success_bands: SuccessBands {
                    active:   Band::new(0.75, 0.95),
                    inactive: Band::new(0.30, 0.60),
                    pending:  Band::new(0.50, 0.70),
                },
                avg_size_gb: Band::new(0.5, 5.0),
                client_id_width: 3,
            },
            schedule: ScheduleConfig {
                start_date: LARGE_START,
                end_date: LARGE_END,
                inactive_end_date: LARGE_INACTIVE_END,
                max_backups_per_client: Some(400),
                weekend_blackout: WeekendBlackout::Fraction { share: 0.1 },
                windows: WindowPolicy::Weighted {
                    nightly: 0.7,
                    early_morning: 0.2,
                    evening: 0.1,
                },
                success_minutes: MinuteRange { min: 5, max: 20 },
                failure_minutes: MinuteRange { min: 1, max: 5 },
                backup_id_width: 6,
            },
            presentation: PresentationConfig {
                join_date: JOIN_DATE,
                logo: "https://api.placeholder.com/40/40".into(),
                retention_days: 30,
            },
            output: OutputConfig::default(),
        }
    }

    /// Minimal config for tests: 20 clients, one quarter of history.
    pub fn default_test() -> Self {
        let mut config = Self::large();
        config.seed = 7;
        config.population.client_count = 20;
        config.schedule.end_date = TEST_END;
        config.schedule.inactive_end_date = TEST_INACTIVE_END;
        config.schedule.max_backups_per_client = None;
        config.output = OutputConfig::in_dir(std::env::temp_dir().join("backupgen-test"));
        config
    }

    pub fn validate(&self) -> GenResult<()> {
        let pop = &self.population;
        let w = &pop.status_weights;
        let weights = [w.active, w.inactive, w.pending];
        if weights.iter().any(|x| *x < 0.0 || !x.is_finite()) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(GenError::invalid("status weights must be non-negative and sum > 0"));
        }
        for (name, band) in [
            ("success_bands.active", pop.success_bands.active),
            ("success_bands.inactive", pop.success_bands.inactive),
            ("success_bands.pending", pop.success_bands.pending),
        ] {
            band.check(name)?;
            if band.min < 0.0 || band.max > 1.0 {
                return Err(GenError::invalid(format!("{name}: must lie within [0, 1]")));
            }
        }
        pop.avg_size_gb.check("avg_size_gb")?;
        if pop.avg_size_gb.min < MIN_SUCCESS_GB {
            return Err(GenError::invalid(format!(
                "avg_size_gb: sizes must be at least {MIN_SUCCESS_GB}"
            )));
        }
        let mut roster_ids = HashSet::new();
        for seed in &pop.roster {
            if !roster_ids.insert(seed.id.as_str()) {
                return Err(GenError::invalid(format!("roster client {} listed twice", seed.id)));
            }
            if !(0.0..=1.0).contains(&seed.success_rate) {
                return Err(GenError::invalid(format!(
                    "roster client {}: success_rate {} outside [0, 1]",
                    seed.id, seed.success_rate
                )));
            }
            if !(seed.avg_size_gb >= MIN_SUCCESS_GB) {
                return Err(GenError::invalid(format!(
                    "roster client {}: avg_size_gb must be at least {MIN_SUCCESS_GB}",
                    seed.id
                )));
            }
        }

        let sched = &self.schedule;
        if sched.end_date < sched.start_date {
            return Err(GenError::invalid(format!(
                "end_date {} precedes start_date {}",
                sched.end_date, sched.start_date
            )));
        }
        if sched.inactive_end_date > sched.end_date {
            log::warn!(
                "inactive_end_date {} is after end_date {}; inactive clients run to the end",
                sched.inactive_end_date,
                sched.end_date
            );
        }
        for (name, range) in [
            ("success_minutes", sched.success_minutes),
            ("failure_minutes", sched.failure_minutes),
        ] {
            if range.min > range.max || range.max > 99 {
                return Err(GenError::invalid(format!(
                    "{name}: [{}, {}] must be ordered and below 100",
                    range.min, range.max
                )));
            }
        }
        if let WeekendBlackout::Fraction { share } = sched.weekend_blackout {
            if !(0.0..=1.0).contains(&share) {
                return Err(GenError::invalid("weekend_blackout.share must lie within [0, 1]"));
            }
        }
        if let WindowPolicy::Weighted { nightly, early_morning, evening } = sched.windows {
            let weights = [nightly, early_morning, evening];
            if weights.iter().any(|x| *x < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
                return Err(GenError::invalid("window weights must be non-negative and sum > 0"));
            }
        }
        Ok(())
    }
}
