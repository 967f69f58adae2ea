//! Tag command handlers.

use tabled::Tabled;

use snmpsim_api::{ManagementClient, Tag};

use crate::cli::{GlobalOpts, TagsArgs, TagsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Objects")]
    objects: usize,
}

/// Number of objects carrying the tag.
fn object_count(t: &Tag) -> usize {
    t.labs.len()
        + t.agents.len()
        + t.engines.len()
        + t.endpoints.len()
        + t.users.len()
        + t.selectors.len()
}

impl From<&Tag> for TagRow {
    fn from(t: &Tag) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            description: t.description.clone(),
            objects: object_count(t),
        }
    }
}

fn detail(t: &Tag) -> String {
    [
        format!("ID:          {}", t.id),
        format!("Name:        {}", t.name),
        format!("Description: {}", t.description),
        format!("Labs:        {}", util::ids(&t.labs, |o| o.id)),
        format!("Agents:      {}", util::ids(&t.agents, |o| o.id)),
        format!("Engines:     {}", util::ids(&t.engines, |o| o.id)),
        format!("Endpoints:   {}", util::ids(&t.endpoints, |o| o.id)),
        format!("Users:       {}", util::ids(&t.users, |o| o.id)),
        format!("Selectors:   {}", util::ids(&t.selectors, |o| o.id)),
    ]
    .join("\n")
}

pub async fn handle(
    client: &ManagementClient,
    args: TagsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TagsCommand::List(list) => {
            let tags = client.get_tags(util::filter_from(&list).as_ref()).await?;
            let out = output::render_list(
                &global.output,
                &tags,
                |t| TagRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TagsCommand::Get { id } => {
            let tag = client.get_tag(id).await?;
            let out = output::render_single(&global.output, &tag, detail, |t| t.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TagsCommand::Create { name, description } => {
            let tag = client.create_tag(&name, &description).await?;
            let out = output::render_single(&global.output, &tag, detail, |t| t.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TagsCommand::Delete { id } => {
            client.delete_tag(id).await?;
            util::report(global, format_args!("Tag {id} deleted"));
            Ok(())
        }

        TagsCommand::Purge { id } => {
            let removed = client.delete_all_objects_with_tag(id).await?;
            util::report(
                global,
                format_args!("Deleted {} objects tagged {id}", object_count(&removed)),
            );
            let out =
                output::render_single(&global.output, &removed, detail, |t| t.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
