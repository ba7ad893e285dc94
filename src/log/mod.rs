//! Counter extraction from ChampSim simulation logs.

pub mod parse;
pub mod record;

pub use parse::{ExtractError, Extractor, parse_log_file};
pub use record::{Field, FieldRecord, Value};
