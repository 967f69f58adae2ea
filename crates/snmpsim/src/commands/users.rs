//! SNMPv3 user command handlers.

use tabled::Tabled;

use snmpsim_api::{ManagementClient, NewUser, User};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Auth")]
    auth_proto: String,
    #[tabled(rename = "Privacy")]
    priv_proto: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            user: u.user.clone(),
            auth_proto: u.auth_proto.clone(),
            priv_proto: u.priv_proto.clone(),
            tags: util::tag_names(&u.tags),
        }
    }
}

// Keys are never echoed back.
fn detail(u: &User) -> String {
    let key_state = |set: bool| if set { "set" } else { "-" };
    [
        format!("ID:       {}", u.id),
        format!("Name:     {}", u.name),
        format!("User:     {}", u.user),
        format!("Auth:     {} (key {})", u.auth_proto, key_state(u.auth_key.is_some())),
        format!("Privacy:  {} (key {})", u.priv_proto, key_state(u.priv_key.is_some())),
        format!("Engines:  {}", util::ids(&u.engines, |e| e.id)),
        format!("Tags:     {}", util::ids(&u.tags, |t| t.id)),
    ]
    .join("\n")
}

pub async fn handle(
    client: &ManagementClient,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List(list) => {
            let users = client.get_users(util::filter_from(&list).as_ref()).await?;
            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id } => {
            let user = client.get_user(id).await?;
            let out = output::render_single(&global.output, &user, detail, |u| u.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            user,
            name,
            auth_proto,
            auth_key,
            priv_proto,
            priv_key,
            tag,
        } => {
            let new_user = NewUser {
                auth_proto,
                auth_key,
                priv_proto,
                priv_key,
                ..NewUser::new(user, name)
            };
            let created = match tag {
                Some(tag_id) => client.create_user_with_tag(&new_user, tag_id).await?,
                None => client.create_user(&new_user).await?,
            };
            let out =
                output::render_single(&global.output, &created, detail, |u| u.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Delete { id } => {
            client.delete_user(id).await?;
            util::report(global, format_args!("User {id} deleted"));
            Ok(())
        }

        UsersCommand::Tag(link) => {
            client.add_tag_to_user(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} added to user {}", link.tag, link.id),
            );
            Ok(())
        }

        UsersCommand::Untag(link) => {
            client.remove_tag_from_user(link.id, link.tag).await?;
            util::report(
                global,
                format_args!("Tag {} removed from user {}", link.tag, link.id),
            );
            Ok(())
        }
    }
}
