//! datagen: synthetic client/backup fixture generator.
//!
//! Usage:
//!   datagen
//!   datagen --seed 12345 --clients 50 --out-dir ./fixtures
//!   datagen --config data/presets/extended.json

use anyhow::{bail, Result};
use backupgen_core::{
    client::ClientStatus,
    config::{GeneratorConfig, OutputConfig},
    pipeline::{Dataset, Generator},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => match flag_value(&args, "--preset").unwrap_or("large") {
            "large" => GeneratorConfig::large(),
            "test" => GeneratorConfig::default_test(),
            other => bail!("unknown preset '{other}' (expected 'large' or 'test')"),
        },
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.population.client_count = parse_arg(&args, "--clients", config.population.client_count);
    if let Some(dir) = flag_value(&args, "--out-dir") {
        config.output = OutputConfig::in_dir(dir);
    }

    println!("Backup fixture generator");
    println!("  seed:      {}", config.seed);
    println!("  clients:   {}", client_label(&config));
    println!(
        "  horizon:   {} .. {}",
        config.schedule.start_date, config.schedule.end_date
    );
    println!("  clients →  {}", config.output.clients_path.display());
    println!("  backups →  {}", config.output.backups_path.display());
    println!();

    log::debug!("config: {config:?}");
    let generator = Generator::new(config)?;
    let dataset = generator.run()?;
    print_summary(&dataset);
    Ok(())
}

fn client_label(config: &GeneratorConfig) -> String {
    if config.population.roster.is_empty() {
        config.population.client_count.to_string()
    } else {
        format!("{} (roster)", config.population.roster.len())
    }
}

fn print_summary(dataset: &Dataset) {
    let s = dataset.summary();

    println!("=== DATASET SUMMARY ===");
    println!("  clients:             {}", s.clients);
    println!("  backups:             {}", s.backups);
    println!("  backups per client:  {}", s.backups_per_client());

    println!();
    println!("=== BACKUP OUTCOMES ===");
    println!("  success: {} ({:.1}%)", s.successful, s.success_pct());
    println!("  failed:  {} ({:.1}%)", s.failed, s.failure_pct());

    println!();
    println!("=== CLIENT STATUS ===");
    for (label, status, n) in [
        ("active", ClientStatus::Active, s.active_clients),
        ("inactive", ClientStatus::Inactive, s.inactive_clients),
        ("pending", ClientStatus::Pending, s.pending_clients),
    ] {
        println!("  {label:<9}{n} ({:.1}%)", s.status_pct(status));
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
