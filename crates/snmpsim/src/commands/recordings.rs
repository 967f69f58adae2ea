//! Record file command handlers.

use tabled::Tabled;

use snmpsim_api::{ManagementClient, Recording};

use crate::cli::{GlobalOpts, RecordingsArgs, RecordingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct RecordingRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
}

impl From<&Recording> for RecordingRow {
    fn from(r: &Recording) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            path: r.path.clone(),
        }
    }
}

pub async fn handle(
    client: &ManagementClient,
    args: RecordingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RecordingsCommand::List(list) => {
            let recordings = client
                .get_record_files(util::filter_from(&list).as_ref())
                .await?;
            let out = output::render_list(
                &global.output,
                &recordings,
                |r| RecordingRow::from(r),
                |r| r.path.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // Contents go to stdout as-is, whatever the output format.
        RecordingsCommand::Get { path } => {
            let contents = client.get_record_file(&path).await?;
            output::print_raw(&contents)
        }

        RecordingsCommand::Upload { local, remote } => {
            client.upload_record_file(&local, &remote).await?;
            util::report(
                global,
                format_args!("Uploaded {} to {remote}", local.display()),
            );
            Ok(())
        }

        RecordingsCommand::Delete { path } => {
            client.delete_record_file(&path).await?;
            util::report(global, format_args!("Record file {path} deleted"));
            Ok(())
        }
    }
}
