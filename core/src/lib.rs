//! Synthetic client and backup-job fixture generation.

pub mod client;
pub mod cnpj;
pub mod config;
pub mod emit;
pub mod error;
pub mod name_generator;
pub mod pipeline;
pub mod rng;
pub mod rollup;
pub mod schedule;
pub mod summary;
pub mod types;
