//! Per-client backup statistics folded from the full backup stream.

use crate::{
    schedule::{BackupOutcome, BackupRecord},
    types::ClientId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `last_backup_date` shown for clients with no backups at all.
pub const NO_BACKUP_SENTINEL: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rollup {
    pub total_backups: u32,
    pub successful_backups: u32,
    pub failed_backups: u32,
    /// Latest backup timestamp, or `NO_BACKUP_SENTINEL`.
    pub last_backup_date: String,
}

impl Rollup {
    /// The "no data" rollup.
    pub fn empty() -> Self {
        Self {
            total_backups: 0,
            successful_backups: 0,
            failed_backups: 0,
            last_backup_date: NO_BACKUP_SENTINEL.to_string(),
        }
    }

    fn first(timestamp: String) -> Self {
        Self {
            last_backup_date: timestamp,
            ..Self::empty()
        }
    }

    fn record(&mut self, outcome: BackupOutcome, timestamp: String) {
        self.total_backups += 1;
        match outcome {
            BackupOutcome::Success => self.successful_backups += 1,
            BackupOutcome::Failed  => self.failed_backups += 1,
        }
        // Fixed-width, zero-padded format: string order is time order.
        if timestamp > self.last_backup_date {
            self.last_backup_date = timestamp;
        }
    }
}

/// Rollups keyed by client id. Clients never seen in the stream are
/// absent; use `get_or_empty` to read with the sentinel fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupTable {
    rollups: BTreeMap<ClientId, Rollup>,
}

impl RollupTable {
    /// Fold the stream. Input order does not matter.
    pub fn aggregate<'a>(backups: impl IntoIterator<Item = &'a BackupRecord>) -> Self {
        let mut rollups: BTreeMap<ClientId, Rollup> = BTreeMap::new();
        for backup in backups {
            let timestamp = backup.timestamp();
            rollups
                .entry(backup.client_id.clone())
                .or_insert_with(|| Rollup::first(timestamp.clone()))
                .record(backup.outcome, timestamp);
        }
        Self { rollups }
    }

    pub fn get(&self, client_id: &str) -> Option<&Rollup> {
        self.rollups.get(client_id)
    }

    pub fn get_or_empty(&self, client_id: &str) -> Rollup {
        self.get(client_id).cloned().unwrap_or_else(Rollup::empty)
    }

    /// Number of distinct clients observed.
    pub fn len(&self) -> usize {
        self.rollups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rollups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClientId, &Rollup)> {
        self.rollups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::BackupDuration;
    use chrono::NaiveDate;

    fn backup(id: &str, client: &str, day: u32, hour: u32, outcome: BackupOutcome) -> BackupRecord {
        BackupRecord {
            backup_id: id.into(),
            client_id: client.into(),
            client_name: format!("{client} Ltda"),
            started_at: NaiveDate::from_ymd_opt(2023, 7, day)
                .unwrap()
                .and_hms_opt(hour, 15, 0)
                .unwrap(),
            outcome,
            duration: BackupDuration { minutes: 7, seconds: 30 },
            size_gb: if outcome == BackupOutcome::Success { 1.5 } else { 0.0 },
        }
    }

    #[test]
    fn counts_and_latest_timestamp() {
        let stream = vec![
            backup("bkp_0003", "clt_001", 3, 23, BackupOutcome::Failed),
            backup("bkp_0001", "clt_001", 1, 23, BackupOutcome::Success),
            backup("bkp_0002", "clt_001", 2, 23, BackupOutcome::Success),
            backup("bkp_0004", "clt_002", 1, 2, BackupOutcome::Success),
        ];
        let table = RollupTable::aggregate(&stream);

        assert_eq!(table.len(), 2);
        let r = table.get("clt_001").unwrap();
        assert_eq!(r.total_backups, 3);
        assert_eq!(r.successful_backups, 2);
        assert_eq!(r.failed_backups, 1);
        assert_eq!(r.last_backup_date, "2023-07-03 23:15:00");
        assert_eq!(table.get("clt_002").unwrap().last_backup_date, "2023-07-01 02:15:00");
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut stream = vec![
            backup("bkp_0001", "clt_001", 5, 23, BackupOutcome::Success),
            backup("bkp_0002", "clt_001", 9, 1, BackupOutcome::Failed),
            backup("bkp_0003", "clt_002", 7, 22, BackupOutcome::Success),
        ];
        let forward = RollupTable::aggregate(&stream);
        stream.reverse();
        let backward = RollupTable::aggregate(&stream);
        assert_eq!(forward, backward);
    }

    #[test]
    fn unseen_client_gets_sentinel() {
        let table = RollupTable::aggregate(&Vec::<BackupRecord>::new());
        assert!(table.is_empty());
        let r = table.get_or_empty("clt_404");
        assert_eq!(r, Rollup::empty());
        assert_eq!(r.last_backup_date, NO_BACKUP_SENTINEL);
    }
}
