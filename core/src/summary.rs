//! End-of-run statistics printed by the command-line runner.

use crate::{
    client::{ClientRecord, ClientStatus},
    schedule::{BackupOutcome, BackupRecord},
};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DatasetSummary {
    pub clients: usize,
    pub backups: usize,
    pub successful: usize,
    pub failed: usize,
    pub active_clients: usize,
    pub inactive_clients: usize,
    pub pending_clients: usize,
}

impl DatasetSummary {
    pub fn compute(clients: &[ClientRecord], backups: &[BackupRecord]) -> Self {
        let mut s = Self {
            clients: clients.len(),
            backups: backups.len(),
            ..Self::default()
        };
        for b in backups {
            match b.outcome {
                BackupOutcome::Success => s.successful += 1,
                BackupOutcome::Failed  => s.failed += 1,
            }
        }
        for c in clients {
            match c.status {
                ClientStatus::Active   => s.active_clients += 1,
                ClientStatus::Inactive => s.inactive_clients += 1,
                ClientStatus::Pending  => s.pending_clients += 1,
            }
        }
        s
    }

    pub fn success_pct(&self) -> f64 {
        pct(self.successful, self.backups)
    }

    pub fn failure_pct(&self) -> f64 {
        pct(self.failed, self.backups)
    }

    pub fn status_pct(&self, status: ClientStatus) -> f64 {
        let n = match status {
            ClientStatus::Active   => self.active_clients,
            ClientStatus::Inactive => self.inactive_clients,
            ClientStatus::Pending  => self.pending_clients,
        };
        pct(n, self.clients)
    }

    /// Integer mean, as shown in the console summary.
    pub fn backups_per_client(&self) -> usize {
        self.backups.checked_div(self.clients).unwrap_or(0)
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_reports_zeroes() {
        let s = DatasetSummary::compute(&[], &[]);
        assert_eq!(s, DatasetSummary::default());
        assert_eq!(s.success_pct(), 0.0);
        assert_eq!(s.failure_pct(), 0.0);
        assert_eq!(s.status_pct(ClientStatus::Active), 0.0);
        assert_eq!(s.backups_per_client(), 0);
    }

    #[test]
    fn clients_without_backups_average_zero() {
        let s = DatasetSummary { clients: 4, active_clients: 3, pending_clients: 1, ..Default::default() };
        assert_eq!(s.backups_per_client(), 0);
        assert_eq!(s.success_pct(), 0.0);
        assert_eq!(s.status_pct(ClientStatus::Active), 75.0);
        assert_eq!(s.status_pct(ClientStatus::Inactive), 0.0);
        assert_eq!(s.status_pct(ClientStatus::Pending), 25.0);
    }

    #[test]
    fn percentages_and_integer_mean() {
        let s = DatasetSummary {
            clients: 3,
            backups: 8,
            successful: 6,
            failed: 2,
            active_clients: 3,
            ..Default::default()
        };
        assert_eq!(s.success_pct(), 75.0);
        assert_eq!(s.failure_pct(), 25.0);
        assert_eq!(s.backups_per_client(), 2);
    }
}
