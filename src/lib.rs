//! # Phalanx
//!
//! Divide-and-conquer operations over in-memory sequences, executed by a
//! fixed pool of workers on disjoint contiguous partitions.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Deterministic partitioning with the remainder on the last range
//! - One task per partition, joined synchronously in submission order
//! - Merges that reproduce the sequential result exactly
//! - Occurrence counting, position discovery, bulk removal, counting sort

pub mod cli;
pub mod container;
pub mod error;
pub mod executor;
pub mod ops;
pub mod partition;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
