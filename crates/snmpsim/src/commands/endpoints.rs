//! Endpoint command handlers.

use tabled::Tabled;

use snmpsim_api::{Endpoint, ManagementClient};

use crate::cli::{EndpointsArgs, EndpointsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Engine")]
    engine: String,
}

impl From<&Endpoint> for EndpointRow {
    fn from(e: &Endpoint) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            protocol: e.protocol.clone(),
            address: e.address.clone(),
            engine: output::or_dash(e.engines.first().map(|en| en.id)),
        }
    }
}

fn detail(e: &Endpoint) -> String {
    [
        format!("ID:       {}", e.id),
        format!("Name:     {}", e.name),
        format!("Protocol: {}", e.protocol),
        format!("Address:  {}", e.address),
        format!("Engines:  {}", util::ids(&e.engines, |en| en.id)),
        format!("Tags:     {}", util::ids(&e.tags, |t| t.id)),
    ]
    .join("\n")
}

pub async fn handle(
    client: &ManagementClient,
    args: EndpointsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EndpointsCommand::List(list) => {
            let endpoints = client
                .get_endpoints(util::filter_from(&list).as_ref())
                .await?;
            let out = output::render_list(
                &global.output,
                &endpoints,
                |e| EndpointRow::from(e),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EndpointsCommand::Get { id } => {
            let endpoint = client.get_endpoint(id).await?;
            let out =
                output::render_single(&global.output, &endpoint, detail, |e| e.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EndpointsCommand::Create {
            name,
            address,
            protocol,
            tag,
        } => {
            let protocol = protocol.as_deref();
            let endpoint = match tag {
                Some(tag_id) => {
                    client
                        .create_endpoint_with_tag(&name, &address, protocol, tag_id)
                        .await?
                }
                None => client.create_endpoint(&name, &address, protocol).await?,
            };
            let out =
                output::render_single(&global.output, &endpoint, detail, |e| e.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EndpointsCommand::Delete { id } => {
            client.delete_endpoint(id).await?;
            util::report(global, format_args!("Endpoint {id} deleted"));
            Ok(())
        }

        EndpointsCommand::Tag(link) => {
            client.add_tag_to_endpoint(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} added to endpoint {}", link.tag, link.id),
            );
            Ok(())
        }

        EndpointsCommand::Untag(link) => {
            client.remove_tag_from_endpoint(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} removed from endpoint {}", link.tag, link.id),
            );
            Ok(())
        }
    }
}
