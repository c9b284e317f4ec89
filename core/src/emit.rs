//! CSV emission for the client and backup tables.
//!
//! Column order is fixed by the field order of ClientRow and BackupRow.
//! Every table is written to a hidden temp file next to its target and
//! renamed into place only after a successful flush.

use crate::{
    client::ClientRecord,
    config::PresentationConfig,
    error::GenResult,
    rollup::RollupTable,
    schedule::BackupRecord,
    types::{format_gb, DATE_FORMAT},
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CLIENT_COLUMNS: [&str; 16] = [
    "client_id",
    "name",
    "cnpj",
    "email",
    "phone",
    "address",
    "status",
    "join_date",
    "logo",
    "backup_frequency",
    "backup_retention_days",
    "last_backup_date",
    "total_backups",
    "successful_backups",
    "failed_backups",
    "avg_backup_size_gb",
];

pub const BACKUP_COLUMNS: [&str; 7] = [
    "backup_id",
    "client_id",
    "client_name",
    "date",
    "status",
    "duration",
    "size",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientRow {
    pub client_id: String,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: &'static str,
    pub join_date: String,
    pub logo: String,
    pub backup_frequency: &'static str,
    pub backup_retention_days: u32,
    pub last_backup_date: String,
    pub total_backups: u32,
    pub successful_backups: u32,
    pub failed_backups: u32,
    pub avg_backup_size_gb: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BackupRow {
    pub backup_id: String,
    pub client_id: String,
    pub client_name: String,
    pub date: String,
    pub status: &'static str,
    pub duration: String,
    pub size: String,
}

impl From<&BackupRecord> for BackupRow {
    fn from(b: &BackupRecord) -> Self {
        Self {
            backup_id: b.backup_id.clone(),
            client_id: b.client_id.clone(),
            client_name: b.client_name.clone(),
            date: b.timestamp(),
            status: b.outcome.as_str(),
            duration: b.duration.to_string(),
            size: format!("{} GB", format_gb(b.size_gb)),
        }
    }
}

/// Merge every client with its rollup (or the sentinel) and the
/// static presentation fields. Output follows population order.
pub fn client_rows(
    clients: &[ClientRecord],
    rollups: &RollupTable,
    presentation: &PresentationConfig,
) -> Vec<ClientRow> {
    let join_date = presentation.join_date.format(DATE_FORMAT).to_string();
    clients
        .iter()
        .map(|c| {
            let stats = rollups.get_or_empty(&c.client_id);
            ClientRow {
                client_id: c.client_id.clone(),
                name: c.name.clone(),
                cnpj: c.cnpj.clone(),
                email: c.email.clone(),
                phone: c.phone.clone(),
                address: c.address.clone(),
                status: c.status.as_str(),
                join_date: join_date.clone(),
                logo: presentation.logo.clone(),
                backup_frequency: c.status.cadence_label(),
                backup_retention_days: presentation.retention_days,
                last_backup_date: stats.last_backup_date,
                total_backups: stats.total_backups,
                successful_backups: stats.successful_backups,
                failed_backups: stats.failed_backups,
                avg_backup_size_gb: format_gb(c.avg_size_gb),
            }
        })
        .collect()
}

pub fn backup_rows(backups: &[BackupRecord]) -> Vec<BackupRow> {
    backups.iter().map(BackupRow::from).collect()
}

/// Serialize rows as CSV with an explicit header into any writer.
/// The header is written even when `rows` is empty.
pub fn write_table<W: Write, R: Serialize>(
    writer: W,
    header: &[&str],
    rows: &[R],
) -> GenResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(header)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Render a table to bytes; used for determinism checks.
pub fn table_bytes<R: Serialize>(header: &[&str], rows: &[R]) -> GenResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_table(&mut buf, header, rows)?;
    Ok(buf)
}

/// Write a table atomically (temp file + rename).
pub fn write_table_atomic<R: Serialize>(path: &Path, header: &[&str], rows: &[R]) -> GenResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let temp_name = format!(
        ".tmp_{}_{}",
        std::process::id(),
        path.file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    );
    let temp_path = parent.join(temp_name);

    let result = (|| -> GenResult<()> {
        let file = File::create(&temp_path)?;
        let mut out = BufWriter::new(file);
        write_table(&mut out, header, rows)?;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        // Best effort: the target was never touched.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

pub fn write_clients(path: &Path, rows: &[ClientRow]) -> GenResult<()> {
    write_table_atomic(path, &CLIENT_COLUMNS, rows)?;
    log::info!("emit: wrote {} client rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_backups(path: &Path, rows: &[BackupRow]) -> GenResult<()> {
    write_table_atomic(path, &BACKUP_COLUMNS, rows)?;
    log::info!("emit: wrote {} backup rows to {}", rows.len(), path.display());
    Ok(())
}
