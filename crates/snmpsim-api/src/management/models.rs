// Management API records
//
// Snapshots of control-plane objects as the service returns them. Field
// names match the JSON keys one to one. Nested collections come back
// shallow (the nested objects carry their own scalar fields but empty
// collections), so every field defaults when absent or `null`.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Group of agents belonging to the same virtual laboratory; powered on
/// and off as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lab {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
    /// `"on"` or `"off"`.
    #[serde(deserialize_with = "null_as_default")]
    pub power: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Lab {
    pub fn has_agent(&self, agent_id: i64) -> bool {
        self.agents.iter().any(|a| a.id == agent_id)
    }
}

/// A simulated device: one or more engines and their endpoints, rooted at
/// a data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_dir: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engines: Vec<Engine>,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub labs: Vec<Lab>,
    #[serde(deserialize_with = "null_as_default")]
    pub selectors: Vec<Selector>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Agent {
    pub fn has_engine(&self, engine_id: i64) -> bool {
        self.engines.iter().any(|e| e.id == engine_id)
    }
}

/// An independent SNMP engine identity, not yet bound to any transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engine {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// SNMP engine ID (hex string or `"auto"`).
    #[serde(deserialize_with = "null_as_default")]
    pub engine_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Engine {
    pub fn has_endpoint(&self, endpoint_id: i64) -> bool {
        self.endpoints.iter().any(|e| e.id == endpoint_id)
    }

    pub fn has_user(&self, user_id: i64) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }
}

/// Transport address an engine can bind. Bound by at most one engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// e.g. `udpv4`, `udpv6`.
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    /// `host:port`.
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engines: Vec<Engine>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

/// SNMPv3 USM user: credentials grouped by user name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// The USM user name.
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    pub auth_key: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub auth_proto: String,
    pub priv_key: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub priv_proto: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engines: Vec<Engine>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

/// A simulation data file under the simulation data root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recording {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
}

/// Template mapping inbound request properties to a data file path.
///
/// Known templates: `${context-engine-id}`, `${context-name}`,
/// `${endpoint-id}`, `${source-address}`. The service only exposes
/// built-in selectors so far; they appear nested in agents and tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selector {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

/// A label attachable to any control-plane object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub engines: Vec<Engine>,
    #[serde(deserialize_with = "null_as_default")]
    pub labs: Vec<Lab>,
    #[serde(deserialize_with = "null_as_default")]
    pub selectors: Vec<Selector>,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// Whether `tags` contains a tag with `tag_id`.
pub fn has_tag(tags: &[Tag], tag_id: i64) -> bool {
    tags.iter().any(|t| t.id == tag_id)
}
