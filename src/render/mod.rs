//! Output renderers: JSON for machine consumers, a text table for people.

pub mod table;

pub use table::render_summary_table;

use serde::Serialize;

/// Pretty JSON, used for both single records and aggregate tables.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
