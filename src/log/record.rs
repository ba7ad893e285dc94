use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A counter the extractor knows how to pull out of a ChampSim log.
///
/// Declaration order is the canonical field order used for iteration and
/// for ordering fields inside an aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "instructions")]
    Instructions,
    #[serde(rename = "cycles")]
    Cycles,
    #[serde(rename = "ipc")]
    Ipc,
    #[serde(rename = "total_time")]
    TotalTime,
    #[serde(rename = "branch_prediction_accuracy")]
    BranchPredictionAccuracy,
    #[serde(rename = "bMPKI")]
    BranchMpki,
    #[serde(rename = "llc_access")]
    LlcAccess,
    #[serde(rename = "llc_hit")]
    LlcHit,
    #[serde(rename = "llc_miss")]
    LlcMiss,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Instructions,
        Field::Cycles,
        Field::Ipc,
        Field::TotalTime,
        Field::BranchPredictionAccuracy,
        Field::BranchMpki,
        Field::LlcAccess,
        Field::LlcHit,
        Field::LlcMiss,
    ];

    /// Name as it appears in JSON output and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Instructions => "instructions",
            Field::Cycles => "cycles",
            Field::Ipc => "ipc",
            Field::TotalTime => "total_time",
            Field::BranchPredictionAccuracy => "branch_prediction_accuracy",
            Field::BranchMpki => "bMPKI",
            Field::LlcAccess => "llc_access",
            Field::LlcHit => "llc_hit",
            Field::LlcMiss => "llc_miss",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown field {:?} (expected one of: {})", s, known.join(", "))
            })
    }
}

/// A single counter value. Integer counters stay integers in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(u64),
    Float(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }
}

/// Counters extracted from one log file.
///
/// A field is `Some` only if its trigger line was found and matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipc: Option<f64>,
    /// Wall-clock simulation time in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_prediction_accuracy: Option<f64>,
    #[serde(rename = "bMPKI", skip_serializing_if = "Option::is_none")]
    pub bmpki: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llc_access: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llc_hit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llc_miss: Option<u64>,
}

impl FieldRecord {
    pub fn get(&self, field: Field) -> Option<Value> {
        match field {
            Field::Instructions => self.instructions.map(Value::Int),
            Field::Cycles => self.cycles.map(Value::Int),
            Field::Ipc => self.ipc.map(Value::Float),
            Field::TotalTime => self.total_time.map(Value::Int),
            Field::BranchPredictionAccuracy => self.branch_prediction_accuracy.map(Value::Float),
            Field::BranchMpki => self.bmpki.map(Value::Float),
            Field::LlcAccess => self.llc_access.map(Value::Int),
            Field::LlcHit => self.llc_hit.map(Value::Int),
            Field::LlcMiss => self.llc_miss.map(Value::Int),
        }
    }

    /// Present fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, Value)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}
