//! Pipeline graph generator and benchmark utilities for pipedag.
//!
//! This crate provides deterministic generation of editor-shaped pipeline
//! submissions for benchmarking and property-based testing of
//! `pipedag-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, Topology, generate_pipeline, to_json};
