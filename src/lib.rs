//! Collect ChampSim performance counters from a results tree and group them
//! by benchmark.
//!
//! - `log`: per-file counter extraction
//! - `model`: directory walk, grouping, per-group statistics
//! - `render`: JSON and text-table output

pub mod log;
pub mod model;
pub mod render;

pub type Result<T> = anyhow::Result<T>;
