//! Engine command handlers.

use tabled::Tabled;

use snmpsim_api::{Engine, ManagementClient};

use crate::cli::{EnginesArgs, EnginesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EngineRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Engine ID")]
    engine_id: String,
    #[tabled(rename = "Users")]
    users: usize,
    #[tabled(rename = "Endpoints")]
    endpoints: usize,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Engine> for EngineRow {
    fn from(e: &Engine) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            engine_id: e.engine_id.clone(),
            users: e.users.len(),
            endpoints: e.endpoints.len(),
            tags: util::tag_names(&e.tags),
        }
    }
}

fn detail(e: &Engine) -> String {
    [
        format!("ID:        {}", e.id),
        format!("Name:      {}", e.name),
        format!("Engine ID: {}", e.engine_id),
        format!("Agents:    {}", util::ids(&e.agents, |a| a.id)),
        format!("Users:     {}", util::ids(&e.users, |u| u.id)),
        format!("Endpoints: {}", util::ids(&e.endpoints, |p| p.id)),
        format!("Tags:      {}", util::ids(&e.tags, |t| t.id)),
    ]
    .join("\n")
}

pub async fn handle(
    client: &ManagementClient,
    args: EnginesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EnginesCommand::List(list) => {
            let engines = client.get_engines(util::filter_from(&list).as_ref()).await?;
            let out = output::render_list(
                &global.output,
                &engines,
                |e| EngineRow::from(e),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnginesCommand::Get { id } => {
            let engine = client.get_engine(id).await?;
            let out =
                output::render_single(&global.output, &engine, detail, |e| e.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnginesCommand::Create {
            name,
            engine_id,
            tag,
        } => {
            let engine_id = engine_id.as_deref();
            let engine = match tag {
                Some(tag_id) => {
                    client
                        .create_engine_with_tag(&name, engine_id, tag_id)
                        .await?
                }
                None => client.create_engine(&name, engine_id).await?,
            };
            let out =
                output::render_single(&global.output, &engine, detail, |e| e.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnginesCommand::Delete { id } => {
            client.delete_engine(id).await?;
            util::report(global, format_args!("Engine {id} deleted"));
            Ok(())
        }

        EnginesCommand::AddUser { engine, user } => {
            client.add_user_to_engine(engine, user).await?;
            util::report(global, format_args!("User {user} added to engine {engine}"));
            Ok(())
        }

        EnginesCommand::RemoveUser { engine, user } => {
            client.remove_user_from_engine(engine, user).await?;
            util::report(
                global,
                format_args!("User {user} removed from engine {engine}"),
            );
            Ok(())
        }

        EnginesCommand::AddEndpoint { engine, endpoint } => {
            client.add_endpoint_to_engine(engine, endpoint).await?;
            util::report(
                global,
                format_args!("Endpoint {endpoint} bound to engine {engine}"),
            );
            Ok(())
        }

        EnginesCommand::RemoveEndpoint { engine, endpoint } => {
            client.remove_endpoint_from_engine(engine, endpoint).await?;
            util::report(
                global,
                format_args!("Endpoint {endpoint} unbound from engine {engine}"),
            );
            Ok(())
        }

        EnginesCommand::Tag(link) => {
            client.add_tag_to_engine(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} added to engine {}", link.tag, link.id),
            );
            Ok(())
        }

        EnginesCommand::Untag(link) => {
            client.remove_tag_from_engine(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} removed from engine {}", link.tag, link.id),
            );
            Ok(())
        }
    }
}
