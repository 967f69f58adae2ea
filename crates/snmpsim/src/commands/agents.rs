//! Agent command handlers.

use tabled::Tabled;

use snmpsim_api::{Agent, ManagementClient};

use crate::cli::{AgentsArgs, AgentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Data Dir")]
    data_dir: String,
    #[tabled(rename = "Engines")]
    engines: usize,
    #[tabled(rename = "Labs")]
    labs: usize,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Agent> for AgentRow {
    fn from(a: &Agent) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            data_dir: a.data_dir.clone(),
            engines: a.engines.len(),
            labs: a.labs.len(),
            tags: util::tag_names(&a.tags),
        }
    }
}

fn detail(a: &Agent) -> String {
    let mut lines = vec![
        format!("ID:        {}", a.id),
        format!("Name:      {}", a.name),
        format!("Data dir:  {}", a.data_dir),
        format!("Engines:   {}", util::ids(&a.engines, |e| e.id)),
        format!("Endpoints: {}", util::ids(&a.endpoints, |e| e.id)),
        format!("Labs:      {}", util::ids(&a.labs, |l| l.id)),
        format!("Tags:      {}", util::ids(&a.tags, |t| t.id)),
    ];
    for s in &a.selectors {
        lines.push(format!("Selector:  {} ({})", s.template, s.comment));
    }
    lines.join("\n")
}

pub async fn handle(
    client: &ManagementClient,
    args: AgentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AgentsCommand::List(list) => {
            let agents = client.get_agents(util::filter_from(&list).as_ref()).await?;
            let out = output::render_list(
                &global.output,
                &agents,
                |a| AgentRow::from(a),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AgentsCommand::Get { id } => {
            let agent = client.get_agent(id).await?;
            let out =
                output::render_single(&global.output, &agent, detail, |a| a.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AgentsCommand::Create {
            name,
            data_dir,
            tag,
        } => {
            let agent = match tag {
                Some(tag_id) => {
                    client
                        .create_agent_with_tag(&name, Some(&data_dir), tag_id)
                        .await?
                }
                None => client.create_agent(&name, Some(&data_dir)).await?,
            };
            let out =
                output::render_single(&global.output, &agent, detail, |a| a.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AgentsCommand::Delete { id } => {
            client.delete_agent(id).await?;
            util::report(global, format_args!("Agent {id} deleted"));
            Ok(())
        }

        AgentsCommand::AddEngine { agent, engine } => {
            client.add_engine_to_agent(agent, engine).await?;
            util::report(global, format_args!("Engine {engine} added to agent {agent}"));
            Ok(())
        }

        AgentsCommand::RemoveEngine { agent, engine } => {
            client.remove_engine_from_agent(agent, engine).await?;
            util::report(
                global,
                format_args!("Engine {engine} removed from agent {agent}"),
            );
            Ok(())
        }

        AgentsCommand::Tag(link) => {
            client.add_tag_to_agent(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} added to agent {}", link.tag, link.id),
            );
            Ok(())
        }

        AgentsCommand::Untag(link) => {
            client.remove_tag_from_agent(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} removed from agent {}", link.tag, link.id),
            );
            Ok(())
        }
    }
}
