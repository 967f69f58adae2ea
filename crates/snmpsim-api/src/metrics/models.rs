// Metrics API records
//
// Read-only telemetry snapshots. Activity counters are optional: the
// service leaves them out until the first hit is observed. Other fields
// default when absent or `null`.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Common properties of one running simulator process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessMetrics {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Executable path.
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    /// Seconds since start.
    #[serde(deserialize_with = "null_as_default")]
    pub runtime: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: i64,
    /// Open file descriptors.
    #[serde(deserialize_with = "null_as_default")]
    pub files: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub exits: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub changes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub update_interval: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update: String,
    #[serde(deserialize_with = "null_as_default")]
    pub console_pages: ConsolePages,
    #[serde(deserialize_with = "null_as_default")]
    pub supervisor: Supervisor,
    pub lifecycle: Option<ProcessLifeCycle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessLifeCycle {
    pub exits: Option<i64>,
    pub restarts: Option<i64>,
}

/// Transport address a process is serving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessEndpoint {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

/// One page of captured process console output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Console {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolePages {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update: String,
}

/// Host and watched directory of the supervising process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supervisor {
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub watch_dir: String,
}

/// Transport-level activity: raw packet counts plus messages that failed
/// before reaching the SNMP engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketMetrics {
    pub first_hit: Option<i64>,
    pub last_hit: Option<i64>,
    pub total: Option<i64>,
    pub parse_failures: Option<i64>,
    pub auth_failures: Option<i64>,
    pub context_failures: Option<i64>,
}

/// SNMP message-level activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageMetrics {
    pub first_hit: Option<i64>,
    pub last_hit: Option<i64>,
    pub pdus: Option<i64>,
    pub var_binds: Option<i64>,
    pub failures: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub variations: Vec<Variation>,
}

/// Per variation-module counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variation {
    pub name: Option<String>,
    pub first_hit: Option<i64>,
    pub last_hit: Option<i64>,
    pub total: Option<i64>,
    pub failures: Option<i64>,
}
