//! The generation pipeline: population, schedule, rollup and emission.
//!
//! EXECUTION ORDER (fixed):
//!   1. Population  (StreamSlot::Population)
//!   2. Schedule    (one stream per client, RngBank::for_client)
//!   3. Rollup      (pure fold over the sorted backup stream)
//!   4. Emission    (both tables, atomically)
//!
//! RULES:
//!   - All randomness flows through the RngBank seeded from config.seed.
//!   - Stages 3 and 4 draw no randomness.

use crate::{
    client::{ClientGenerator, ClientRecord},
    config::GeneratorConfig,
    emit::{self, BackupRow, ClientRow, BACKUP_COLUMNS, CLIENT_COLUMNS},
    error::GenResult,
    rng::{RngBank, StreamSlot},
    rollup::RollupTable,
    schedule::{self, BackupRecord},
    summary::DatasetSummary,
};

/// Everything one run produces, before serialization.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub clients: Vec<ClientRecord>,
    /// Sorted by timestamp.
    pub backups: Vec<BackupRecord>,
    pub rollups: RollupTable,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::compute(&self.clients, &self.backups)
    }
}

pub struct Generator {
    pub config: GeneratorConfig,
    pub rng_bank: RngBank,
}

impl Generator {
    /// Validate the config and seed the RNG bank from it.
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(config.seed);
        Ok(Self { config, rng_bank })
    }

    /// Run stages 1–3. Infallible once the config validated.
    pub fn generate(&self) -> Dataset {
        log::info!("generate: seed={}", self.rng_bank.master_seed());

        let mut population_rng = self.rng_bank.for_stream(StreamSlot::Population);
        let clients =
            ClientGenerator::generate_population(&self.config.population, &mut population_rng);

        let backups = schedule::expand_all(&clients, &self.config.schedule, &self.rng_bank);
        let rollups = RollupTable::aggregate(&backups);
        log::info!(
            "rollup: {} of {} clients have backups",
            rollups.len(),
            clients.len()
        );

        Dataset { clients, backups, rollups }
    }

    pub fn client_rows(&self, dataset: &Dataset) -> Vec<ClientRow> {
        emit::client_rows(&dataset.clients, &dataset.rollups, &self.config.presentation)
    }

    /// Stage 4: write both tables to the configured paths.
    pub fn write(&self, dataset: &Dataset) -> GenResult<()> {
        let out = &self.config.output;
        emit::write_clients(&out.clients_path, &self.client_rows(dataset))?;
        emit::write_backups(&out.backups_path, &emit::backup_rows(&dataset.backups))?;
        Ok(())
    }

    /// Generate and write in one go.
    pub fn run(&self) -> GenResult<Dataset> {
        let dataset = self.generate();
        self.write(&dataset)?;
        Ok(dataset)
    }

    /// Both tables rendered in memory, clients first.
    pub fn render(&self, dataset: &Dataset) -> GenResult<(Vec<u8>, Vec<u8>)> {
        let clients = emit::table_bytes(&CLIENT_COLUMNS, &self.client_rows(dataset))?;
        let backups: Vec<BackupRow> = emit::backup_rows(&dataset.backups);
        let backups = emit::table_bytes(&BACKUP_COLUMNS, &backups)?;
        Ok((clients, backups))
    }
}
