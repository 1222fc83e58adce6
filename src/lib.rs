//! patchtree: Game Patch Manifest Browser
//!
//! Turns flat, remotely hosted patch manifests into a browsable directory
//! tree: manifest parsing, tree expansion and merging, deterministic
//! ordering, size aggregation and path lookup, plus the refresh pipeline
//! that publishes finished trees to readers.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod listing;
pub mod logging;
pub mod manifest;
pub mod transport;
pub mod tree;
