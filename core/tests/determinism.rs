//! Same seed, same config => byte-identical tables.
//! Any divergence means something drew from a non-seeded source.

use backupgen_core::{config::GeneratorConfig, pipeline::Generator};

fn render(config: GeneratorConfig) -> (Vec<u8>, Vec<u8>) {
    let generator = Generator::new(config).expect("valid config");
    let dataset = generator.generate();
    generator.render(&dataset).expect("render")
}

#[test]
fn same_seed_produces_identical_tables() {
    let (clients_a, backups_a) = render(GeneratorConfig::default_test());
    let (clients_b, backups_b) = render(GeneratorConfig::default_test());

    assert!(!backups_a.is_empty());
    assert_eq!(clients_a, clients_b, "client tables diverged");
    assert_eq!(backups_a, backups_b, "backup tables diverged");
}

#[test]
fn different_seeds_produce_different_tables() {
    let mut a = GeneratorConfig::default_test();
    let mut b = GeneratorConfig::default_test();
    a.seed = 42;
    b.seed = 99;

    let (clients_a, backups_a) = render(a);
    let (clients_b, backups_b) = render(b);

    assert_ne!(clients_a, clients_b, "seed is not reaching the population stream");
    assert_ne!(backups_a, backups_b, "seed is not reaching the client streams");
}

#[test]
fn client_history_does_not_depend_on_population_size() {
    // Client streams are keyed by index, so adding clients at the end
    // must leave the first client's history untouched.
    let small = GeneratorConfig::default_test();
    let mut big = GeneratorConfig::default_test();
    big.population.client_count = small.population.client_count * 2;

    let ds_small = Generator::new(small).unwrap().generate();
    let ds_big = Generator::new(big).unwrap().generate();

    let first = |ds: &backupgen_core::pipeline::Dataset| -> Vec<String> {
        ds.backups
            .iter()
            .filter(|b| b.client_id == "clt_001")
            .map(|b| format!("{} {} {} {}", b.timestamp(), b.outcome, b.duration, b.size_gb))
            .collect()
    };
    assert_eq!(first(&ds_small), first(&ds_big));
}
