//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod agents;
pub mod config_cmd;
pub mod endpoints;
pub mod engines;
pub mod labs;
pub mod metrics;
pub mod recordings;
pub mod tags;
pub mod users;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Connection};
use crate::error::CliError;

/// Dispatch a simulator-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    connection: &Connection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Command::Metrics(args) = cmd {
        let client = config::metrics_client(connection)?;
        return metrics::handle(&client, args, global).await;
    }

    let client = config::management_client(connection)?;
    match cmd {
        Command::Labs(args) => labs::handle(&client, args, global).await,
        Command::Agents(args) => agents::handle(&client, args, global).await,
        Command::Engines(args) => engines::handle(&client, args, global).await,
        Command::Endpoints(args) => endpoints::handle(&client, args, global).await,
        Command::Users(args) => users::handle(&client, args, global).await,
        Command::Tags(args) => tags::handle(&client, args, global).await,
        Command::Recordings(args) => recordings::handle(&client, args, global).await,
        // Metrics, Config and Completions are handled before this point
        Command::Metrics(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
