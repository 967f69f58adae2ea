//! Clap derive structures for the `snmpsimctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// snmpsimctl -- manage a remote SNMP simulator from the command line
#[derive(Debug, Parser)]
#[command(
    name = "snmpsimctl",
    version,
    about = "Manage SNMP simulator labs, agents, and recordings from the command line",
    long_about = "A CLI for the SNMP simulator control plane.\n\n\
        Drives the management API (labs, agents, engines, endpoints, users,\n\
        tags, record files) and reads the metrics API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "SNMPSIM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Simulator service root URL (overrides profile)
    #[arg(long, short = 'u', env = "SNMPSIM_URL", global = true)]
    pub url: Option<String>,

    /// Username for HTTP basic auth
    #[arg(long, env = "SNMPSIM_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for HTTP basic auth
    #[arg(long, env = "SNMPSIM_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SNMPSIM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SNMPSIM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SNMPSIM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage labs (groups of agents powered as a unit)
    Labs(LabsArgs),

    /// Manage simulated agents
    #[command(alias = "ag")]
    Agents(AgentsArgs),

    /// Manage SNMP engines
    #[command(alias = "eng")]
    Engines(EnginesArgs),

    /// Manage transport endpoints
    #[command(alias = "ep")]
    Endpoints(EndpointsArgs),

    /// Manage SNMPv3 users
    Users(UsersArgs),

    /// Manage tags
    Tags(TagsArgs),

    /// Manage simulation record files
    #[command(alias = "rec")]
    Recordings(RecordingsArgs),

    /// Read process and activity metrics
    Metrics(MetricsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Server-side filtering for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter as key=value (repeatable), passed through as query parameters
    #[arg(long, short = 'f', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filter: Vec<(String, String)>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Attach or detach a tag.
#[derive(Debug, Args)]
pub struct TagLinkArgs {
    /// Object ID
    pub id: i64,
    /// Tag ID
    pub tag: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LABS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LabsArgs {
    #[command(subcommand)]
    pub command: LabsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LabsCommand {
    /// List labs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get lab details
    Get { id: i64 },

    /// Create a lab
    Create {
        name: String,

        /// Create under this tag
        #[arg(long)]
        tag: Option<i64>,
    },

    /// Delete a lab
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Add an agent to a lab
    AddAgent { lab: i64, agent: i64 },

    /// Remove an agent from a lab
    RemoveAgent { lab: i64, agent: i64 },

    /// Power a lab on or off
    Power { id: i64, state: PowerState },

    /// Tag a lab
    Tag(TagLinkArgs),

    /// Untag a lab
    Untag(TagLinkArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AGENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AgentsCommand {
    /// List agents
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get agent details
    Get { id: i64 },

    /// Create an agent
    Create {
        name: String,

        /// Data directory relative to the simulation data root
        #[arg(long, default_value = ".")]
        data_dir: String,

        /// Create under this tag
        #[arg(long)]
        tag: Option<i64>,
    },

    /// Delete an agent
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Add an engine to an agent
    AddEngine { agent: i64, engine: i64 },

    /// Remove an engine from an agent
    RemoveEngine { agent: i64, engine: i64 },

    /// Tag an agent
    Tag(TagLinkArgs),

    /// Untag an agent
    Untag(TagLinkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENGINES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EnginesArgs {
    #[command(subcommand)]
    pub command: EnginesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnginesCommand {
    /// List engines
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get engine details
    Get { id: i64 },

    /// Create an engine
    Create {
        name: String,

        /// SNMP engine ID (hex); generated by the service when omitted
        #[arg(long)]
        engine_id: Option<String>,

        /// Create under this tag
        #[arg(long)]
        tag: Option<i64>,
    },

    /// Delete an engine
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Add a user to an engine
    AddUser { engine: i64, user: i64 },

    /// Remove a user from an engine
    RemoveUser { engine: i64, user: i64 },

    /// Bind an endpoint to an engine
    AddEndpoint { engine: i64, endpoint: i64 },

    /// Unbind an endpoint from an engine
    RemoveEndpoint { engine: i64, endpoint: i64 },

    /// Tag an engine
    Tag(TagLinkArgs),

    /// Untag an engine
    Untag(TagLinkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENDPOINTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    #[command(subcommand)]
    pub command: EndpointsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EndpointsCommand {
    /// List endpoints
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get endpoint details
    Get { id: i64 },

    /// Create an endpoint
    Create {
        name: String,

        /// Listen address as host:port
        address: String,

        /// Transport protocol (udpv4, udpv6)
        #[arg(long)]
        protocol: Option<String>,

        /// Create under this tag
        #[arg(long)]
        tag: Option<i64>,
    },

    /// Delete an endpoint
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Tag an endpoint
    Tag(TagLinkArgs),

    /// Untag an endpoint
    Untag(TagLinkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get user details
    Get { id: i64 },

    /// Create an SNMPv3 user
    Create {
        /// USM user name
        user: String,

        /// Object name
        name: String,

        /// Authentication protocol (md5, sha, ...)
        #[arg(long, requires = "auth_key")]
        auth_proto: Option<String>,

        /// Authentication key
        #[arg(long)]
        auth_key: Option<String>,

        /// Privacy protocol (des, aes, ...)
        #[arg(long, requires = "priv_key")]
        priv_proto: Option<String>,

        /// Privacy key
        #[arg(long)]
        priv_key: Option<String>,

        /// Create under this tag
        #[arg(long)]
        tag: Option<i64>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Tag a user
    Tag(TagLinkArgs),

    /// Untag a user
    Untag(TagLinkArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TAGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List tags
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get tag details
    Get { id: i64 },

    /// Create a tag
    Create {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a tag (tagged objects stay)
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Delete every object carrying the tag
    Purge { id: i64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RECORDINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RecordingsArgs {
    #[command(subcommand)]
    pub command: RecordingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordingsCommand {
    /// List record files
    #[command(alias = "ls")]
    List(ListArgs),

    /// Print a record file
    Get {
        /// Remote path ending in .snmprec
        path: String,
    },

    /// Upload a local record file
    Upload {
        /// Local .snmprec file
        local: PathBuf,

        /// Remote path ending in .snmprec
        remote: String,
    },

    /// Delete a record file
    #[command(alias = "rm")]
    Delete {
        /// Remote path ending in .snmprec
        path: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  METRICS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MetricsArgs {
    #[command(subcommand)]
    pub command: MetricsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MetricsCommand {
    /// List simulator processes
    Processes(ListArgs),

    /// Get process details
    Process { id: i64 },

    /// Transport endpoints served by a process
    ProcessEndpoints {
        process: i64,

        /// Show a single endpoint
        #[arg(long)]
        endpoint: Option<i64>,
    },

    /// Captured console output of a process
    Console {
        process: i64,

        /// Show a single page
        #[arg(long)]
        page: Option<i64>,
    },

    /// Packet-level activity counters
    Packets(ListArgs),

    /// Packet filter names, or the values of one filter
    PacketFilters { name: Option<String> },

    /// Message-level activity counters
    Messages(ListArgs),

    /// Message filter names, or the values of one filter
    MessageFilters { name: Option<String> },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current configuration
    Show,

    /// Write a profile and make it the default
    ///
    /// Takes --username and --insecure from the global flags.
    Init {
        /// Simulator service root URL
        url: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Environment variable holding the password
        #[arg(long)]
        password_env: Option<String>,

        /// Overwrite an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Set a value on the active profile
    Set {
        /// Profile key (url, username, password, password_env, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_pairs_split_on_first_equals() {
        assert_eq!(
            parse_key_val("name=a=b"),
            Ok(("name".to_owned(), "a=b".to_owned()))
        );
        assert!(parse_key_val("=x").is_err());
        assert!(parse_key_val("novalue").is_err());
    }
}
