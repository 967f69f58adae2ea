//! Lab command handlers.

use tabled::Tabled;

use snmpsim_api::{Lab, ManagementClient};

use crate::cli::{GlobalOpts, LabsArgs, LabsCommand, PowerState};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LabRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Agents")]
    agents: usize,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Lab> for LabRow {
    fn from(l: &Lab) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            power: l.power.clone(),
            agents: l.agents.len(),
            tags: util::tag_names(&l.tags),
        }
    }
}

fn detail(l: &Lab) -> String {
    [
        format!("ID:     {}", l.id),
        format!("Name:   {}", l.name),
        format!("Power:  {}", l.power),
        format!("Agents: {}", util::ids(&l.agents, |a| a.id)),
        format!("Tags:   {}", util::ids(&l.tags, |t| t.id)),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &ManagementClient,
    args: LabsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LabsCommand::List(list) => {
            let labs = client.get_labs(util::filter_from(&list).as_ref()).await?;
            let out = output::render_list(
                &global.output,
                &labs,
                |l| LabRow::from(l),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LabsCommand::Get { id } => {
            let lab = client.get_lab(id).await?;
            let out = output::render_single(&global.output, &lab, detail, |l| l.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LabsCommand::Create { name, tag } => {
            let lab = match tag {
                Some(tag_id) => client.create_lab_with_tag(&name, tag_id).await?,
                None => client.create_lab(&name).await?,
            };
            let out = output::render_single(&global.output, &lab, detail, |l| l.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LabsCommand::Delete { id } => {
            client.delete_lab(id).await?;
            util::report(global, format_args!("Lab {id} deleted"));
            Ok(())
        }

        LabsCommand::AddAgent { lab, agent } => {
            client.add_agent_to_lab(lab, agent).await?;
            util::report(global, format_args!("Agent {agent} added to lab {lab}"));
            Ok(())
        }

        LabsCommand::RemoveAgent { lab, agent } => {
            client.remove_agent_from_lab(lab, agent).await?;
            util::report(global, format_args!("Agent {agent} removed from lab {lab}"));
            Ok(())
        }

        LabsCommand::Power { id, state } => {
            let on = matches!(state, PowerState::On);
            client.set_lab_power(id, on).await?;
            util::report(
                global,
                format_args!("Lab {id} powered {}", if on { "on" } else { "off" }),
            );
            Ok(())
        }

        LabsCommand::Tag(link) => {
            client.add_tag_to_lab(link.id, link.tag).await?;
            util::report(global, format_args!("Tag {} added to lab {}", link.tag, link.id));
            Ok(())
        }

        LabsCommand::Untag(link) => {
            client.remove_tag_from_lab(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} removed from lab {}", link.tag, link.id),
            );
            Ok(())
        }
    }
}
