//! Identity number generator and benchmark utilities for rsaid.
//!
//! This crate provides deterministic generation of valid South African
//! identity numbers for benchmarking and testing `rsaid-core`.

pub mod generator;

pub use generator::{
    GeneratedId, GeneratorConfig, SizeTier, corrupt_check_digit, generate_batch,
    generate_id_number,
};
