//! Client population: identity, lifecycle status and backup tendencies.

use crate::{
    cnpj,
    config::PopulationConfig,
    name_generator::NameGenerator,
    rng::StreamRng,
    types::{round2, ClientId},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    Pending,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active   => "active",
            Self::Inactive => "inactive",
            Self::Pending  => "pending",
        }
    }

    /// Days between consecutive scheduled backups.
    pub fn cadence_days(&self) -> u64 {
        match self {
            Self::Inactive => 7,
            Self::Active | Self::Pending => 1,
        }
    }

    /// Label shown in the `backup_frequency` column.
    pub fn cadence_label(&self) -> &'static str {
        match self.cadence_days() {
            7 => "weekly",
            _ => "daily",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hand-written client, as listed in a roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSeed {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    pub avg_size_gb: f64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRecord {
    pub client_id: ClientId,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    /// Mean size of a successful backup, in GB.
    pub avg_size_gb: f64,
    /// Probability that any single backup succeeds.
    pub success_rate: f64,
}

pub struct ClientGenerator;

impl ClientGenerator {
    /// Build the population: the roster when one is configured,
    /// otherwise `client_count` freshly drawn clients.
    pub fn generate_population(config: &PopulationConfig, rng: &mut StreamRng) -> Vec<ClientRecord> {
        let clients: Vec<ClientRecord> = if config.roster.is_empty() {
            (0..config.client_count)
                .map(|i| Self::generate_client(config, i, rng))
                .collect()
        } else {
            config
                .roster
                .iter()
                .map(|seed| Self::from_seed(seed, rng))
                .collect()
        };
        log::info!(
            "population: {} clients ({} from roster)",
            clients.len(),
            config.roster.len()
        );
        clients
    }

    /// Draw one client. `index` is zero-based; ids start at 1.
    pub fn generate_client(config: &PopulationConfig, index: usize, rng: &mut StreamRng) -> ClientRecord {
        let identity = NameGenerator::generate_identity(rng);
        let cnpj = cnpj::generate(rng);
        let status = Self::pick_status(config, rng);
        let band = config.success_bands.for_status(status);
        let success_rate = round2(rng.uniform(band.min, band.max));
        let avg_size_gb = round2(rng.uniform(config.avg_size_gb.min, config.avg_size_gb.max));

        ClientRecord {
            client_id: client_id(index + 1, config.client_id_width),
            name: identity.name,
            cnpj,
            email: identity.email,
            phone: identity.phone,
            address: identity.address,
            status,
            avg_size_gb,
            success_rate,
        }
    }

    /// Roster clients keep every hand-written field; only the CNPJ is drawn.
    pub fn from_seed(seed: &ClientSeed, rng: &mut StreamRng) -> ClientRecord {
        ClientRecord {
            client_id: seed.id.clone(),
            name: seed.name.clone(),
            cnpj: cnpj::generate(rng),
            email: seed.email.clone(),
            phone: seed.phone.clone(),
            address: seed.address.clone(),
            status: seed.status,
            avg_size_gb: seed.avg_size_gb,
            success_rate: seed.success_rate,
        }
    }

    fn pick_status(config: &PopulationConfig, rng: &mut StreamRng) -> ClientStatus {
        let w = &config.status_weights;
        match rng.weighted_index(&[w.active, w.inactive, w.pending]) {
            0 => ClientStatus::Active,
            1 => ClientStatus::Inactive,
            _ => ClientStatus::Pending,
        }
    }
}

/// `clt_` followed by the zero-padded sequence number.
pub fn client_id(n: usize, width: usize) -> ClientId {
    format!("clt_{n:0width$}")
}
