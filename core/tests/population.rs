//! Client population generation tests.

use backupgen_core::{
    client::{ClientGenerator, ClientSeed, ClientStatus},
    cnpj,
    config::GeneratorConfig,
    rng::{RngBank, StreamSlot},
};
use std::collections::HashSet;

fn population(count: usize, seed: u64) -> Vec<backupgen_core::client::ClientRecord> {
    let mut config = GeneratorConfig::large();
    config.population.client_count = count;
    let mut rng = RngBank::new(seed).for_stream(StreamSlot::Population);
    ClientGenerator::generate_population(&config.population, &mut rng)
}

#[test]
fn generates_requested_count_with_dense_ids() {
    let clients = population(120, 42);
    assert_eq!(clients.len(), 120);
    for (i, c) in clients.iter().enumerate() {
        assert_eq!(c.client_id, format!("clt_{:03}", i + 1));
    }
    let unique: HashSet<_> = clients.iter().map(|c| &c.client_id).collect();
    assert_eq!(unique.len(), clients.len());
}

#[test]
fn ids_widen_past_the_padding() {
    let clients = population(1000, 1);
    assert_eq!(clients[998].client_id, "clt_999");
    assert_eq!(clients[999].client_id, "clt_1000");
}

#[test]
fn every_cnpj_passes_the_checksum() {
    for c in population(300, 7) {
        assert!(cnpj::is_valid(&c.cnpj), "{} has invalid CNPJ {}", c.client_id, c.cnpj);
    }
}

#[test]
fn success_rate_band_depends_on_status() {
    let config = GeneratorConfig::large();
    for c in population(500, 11) {
        let band = config.population.success_bands.for_status(c.status);
        assert!(
            c.success_rate >= band.min && c.success_rate <= band.max,
            "{} ({}) success_rate {} outside [{}, {}]",
            c.client_id, c.status, c.success_rate, band.min, band.max
        );
        assert!(
            (0.5..=5.0).contains(&c.avg_size_gb),
            "avg_size_gb {} outside [0.5, 5.0]",
            c.avg_size_gb
        );
    }
}

#[test]
fn status_distribution_is_roughly_80_10_10() {
    let clients = population(2000, 2024);
    let active = clients.iter().filter(|c| c.status == ClientStatus::Active).count();
    let inactive = clients.iter().filter(|c| c.status == ClientStatus::Inactive).count();
    let pending = clients.iter().filter(|c| c.status == ClientStatus::Pending).count();

    assert_eq!(active + inactive + pending, 2000);
    assert!((1500..=1700).contains(&active), "active={active}");
    assert!((120..=280).contains(&inactive), "inactive={inactive}");
    assert!((120..=280).contains(&pending), "pending={pending}");
}

#[test]
fn roster_clients_are_kept_verbatim() {
    let mut config = GeneratorConfig::large();
    config.population.roster = vec![ClientSeed {
        id: "clt_042".into(),
        name: "DataGuard Brasil".into(),
        email: "contato@dataguard.com.br".into(),
        phone: "(41) 5678-9012".into(),
        address: "Curitiba - PR".into(),
        status: ClientStatus::Inactive,
        avg_size_gb: 1.55,
        success_rate: 0.43,
    }];
    let mut rng = RngBank::new(5).for_stream(StreamSlot::Population);
    let clients = ClientGenerator::generate_population(&config.population, &mut rng);

    assert_eq!(clients.len(), 1, "roster must override client_count");
    let c = &clients[0];
    assert_eq!(c.client_id, "clt_042");
    assert_eq!(c.name, "DataGuard Brasil");
    assert_eq!(c.status, ClientStatus::Inactive);
    assert_eq!(c.avg_size_gb, 1.55);
    assert_eq!(c.success_rate, 0.43);
    assert!(cnpj::is_valid(&c.cnpj));
}

#[test]
fn extended_preset_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/presets/extended.json");
    let config = GeneratorConfig::load(path).expect("extended preset");
    assert_eq!(config.population.roster.len(), 30);
    assert_eq!(config.schedule.backup_id_width, 4);
}
