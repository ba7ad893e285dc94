use crate::log::record::{Field, FieldRecord};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SIM_COMPLETE: &str = "Simulation complete";
const BRANCH_ACCURACY: &str = "Branch Prediction Accuracy";
const LLC_TOTAL: &str = "LLC TOTAL";

// Final per-CPU summary:
// Simulation complete CPU 0 instructions: 100000000 cycles: 89230158 cumulative IPC: 1.12069 (Simulation time: 0 hr 3 min 5 sec)
const SUMMARY_RE: &str = r"instructions: (\d+) cycles: (\d+) cumulative IPC: ([\d.]+) \(Simulation time: (\d+) hr (\d+) min (\d+) sec\)";
// CPU 0 Branch Prediction Accuracy: 95.1234% MPKI: 4.321 Average ROB Occupancy at Mispredict: 120.3
const BRANCH_RE: &str = r"^CPU \d+ Branch Prediction Accuracy: (\d+\.?\d*)% MPKI: (\d+\.?\d*)";
// LLC TOTAL     ACCESS:    1234567  HIT:     234567  MISS:    1000000
const LLC_RE: &str = r"^LLC TOTAL\s+ACCESS:\s+(\d+)\s+HIT:\s+(\d+)\s+MISS:\s+(\d+)";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("read log file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A trigger substring was present but the line did not have the expected layout.
    #[error("{origin}:{line}: {trigger:?} line does not match the expected layout: {text:?}")]
    PatternMismatch {
        origin: String,
        line: usize,
        trigger: &'static str,
        text: String,
    },

    #[error("{origin}:{line}: invalid value {value:?} for {field}")]
    InvalidNumber {
        origin: String,
        line: usize,
        field: Field,
        value: String,
    },

    #[error("compile built-in pattern")]
    Pattern(#[from] regex::Error),
}

/// Compiled trigger patterns. Build once and reuse across files.
#[derive(Debug, Clone)]
pub struct Extractor {
    summary: Regex,
    branch: Regex,
    llc: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            summary: Regex::new(SUMMARY_RE)?,
            branch: Regex::new(BRANCH_RE)?,
            llc: Regex::new(LLC_RE)?,
        })
    }

    /// Read `path` fully and extract its counters.
    pub fn parse_file(&self, path: &Path) -> Result<FieldRecord, ExtractError> {
        let text = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_text(&text, &path.display().to_string())
    }

    /// Extract counters from already-read log text. `origin` only labels errors.
    ///
    /// Every line is checked against all three triggers; a later match
    /// overwrites the fields set by an earlier one.
    pub fn parse_text(&self, text: &str, origin: &str) -> Result<FieldRecord, ExtractError> {
        let mut rec = FieldRecord::default();

        for (lineno, line) in text.lines().enumerate() {
            let at = LineAt {
                origin,
                line: lineno + 1,
                text: line,
            };

            if line.contains(SIM_COMPLETE) {
                let caps = at.captures(&self.summary, SIM_COMPLETE)?;
                let instructions = at.int(&caps, 1, Field::Instructions)?;
                let cycles = at.int(&caps, 2, Field::Cycles)?;
                let ipc = at.float(&caps, 3, Field::Ipc)?;
                let hours = at.int(&caps, 4, Field::TotalTime)?;
                let minutes = at.int(&caps, 5, Field::TotalTime)?;
                let seconds = at.int(&caps, 6, Field::TotalTime)?;

                let total_time = hours
                    .checked_mul(3600)
                    .zip(minutes.checked_mul(60))
                    .and_then(|(h, m)| h.checked_add(m))
                    .and_then(|hm| hm.checked_add(seconds))
                    .ok_or_else(|| {
                        at.invalid(
                            Field::TotalTime,
                            format!("{} hr {} min {} sec", hours, minutes, seconds),
                        )
                    })?;

                rec.instructions = Some(instructions);
                rec.cycles = Some(cycles);
                rec.ipc = Some(ipc);
                rec.total_time = Some(total_time);
                tracing::trace!(origin, line = at.line, trigger = SIM_COMPLETE, "matched");
            }

            if line.contains(BRANCH_ACCURACY) {
                let caps = at.captures(&self.branch, BRANCH_ACCURACY)?;
                rec.branch_prediction_accuracy =
                    Some(at.float(&caps, 1, Field::BranchPredictionAccuracy)?);
                rec.bmpki = Some(at.float(&caps, 2, Field::BranchMpki)?);
                tracing::trace!(origin, line = at.line, trigger = BRANCH_ACCURACY, "matched");
            }

            if line.contains(LLC_TOTAL) {
                let caps = at.captures(&self.llc, LLC_TOTAL)?;
                rec.llc_access = Some(at.int(&caps, 1, Field::LlcAccess)?);
                rec.llc_hit = Some(at.int(&caps, 2, Field::LlcHit)?);
                rec.llc_miss = Some(at.int(&caps, 3, Field::LlcMiss)?);
                tracing::trace!(origin, line = at.line, trigger = LLC_TOTAL, "matched");
            }
        }

        Ok(rec)
    }
}

/// Parse a single ChampSim log file with a freshly compiled extractor.
pub fn parse_log_file(path: &Path) -> Result<FieldRecord, ExtractError> {
    Extractor::new()?.parse_file(path)
}

/// Position of the line being scanned, for error reporting.
struct LineAt<'a> {
    origin: &'a str,
    line: usize,
    text: &'a str,
}

impl<'a> LineAt<'a> {
    fn captures(&self, re: &Regex, trigger: &'static str) -> Result<Captures<'a>, ExtractError> {
        re.captures(self.text)
            .ok_or_else(|| ExtractError::PatternMismatch {
                origin: self.origin.to_string(),
                line: self.line,
                trigger,
                text: self.text.to_string(),
            })
    }

    fn group(&self, caps: &Captures<'a>, idx: usize) -> &'a str {
        // Every group in the built-in patterns is mandatory.
        caps.get(idx).map(|m| m.as_str()).unwrap_or_default()
    }

    fn int(&self, caps: &Captures<'a>, idx: usize, field: Field) -> Result<u64, ExtractError> {
        let raw = self.group(caps, idx);
        raw.parse().map_err(|_| self.invalid(field, raw.to_string()))
    }

    fn float(&self, caps: &Captures<'a>, idx: usize, field: Field) -> Result<f64, ExtractError> {
        let raw = self.group(caps, idx);
        raw.parse().map_err(|_| self.invalid(field, raw.to_string()))
    }

    fn invalid(&self, field: Field, value: String) -> ExtractError {
        ExtractError::InvalidNumber {
            origin: self.origin.to_string(),
            line: self.line,
            field,
            value,
        }
    }
}
