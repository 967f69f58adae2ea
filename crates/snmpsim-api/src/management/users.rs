// Management API SNMPv3 user endpoints

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, or_default, require};
use crate::management::models::User;

/// Protocol used when no auth or privacy protocol is given.
pub const NO_PROTOCOL: &str = "none";

/// Parameters for a new SNMPv3 user.
///
/// Keys left unset are sent as JSON `null`; protocols left unset are sent
/// as `"none"`.
///
/// ```
/// use snmpsim_api::NewUser;
///
/// let user = NewUser::new("simulator", "sim-user").auth("md5", "auctoritas");
/// assert_eq!(user.auth_proto.as_deref(), Some("md5"));
/// assert!(user.priv_key.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// USM user name.
    pub user: String,
    /// Display name of the control-plane object.
    pub name: String,
    pub auth_key: Option<String>,
    pub auth_proto: Option<String>,
    pub priv_key: Option<String>,
    pub priv_proto: Option<String>,
}

impl NewUser {
    pub fn new(user: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the authentication protocol and key.
    pub fn auth(mut self, proto: impl Into<String>, key: impl Into<String>) -> Self {
        self.auth_proto = Some(proto.into());
        self.auth_key = Some(key.into());
        self
    }

    /// Set the privacy protocol and key.
    pub fn privacy(mut self, proto: impl Into<String>, key: impl Into<String>) -> Self {
        self.priv_proto = Some(proto.into());
        self.priv_key = Some(key.into());
        self
    }

    fn body(&self) -> Result<UserBody<'_>, Error> {
        let name = require(&self.name, "invalid name")?;
        let user = require(&self.user, "invalid user")?;
        Ok(UserBody {
            user,
            name,
            auth_key: non_empty(self.auth_key.as_deref()),
            auth_proto: or_default(self.auth_proto.as_deref(), NO_PROTOCOL),
            priv_key: non_empty(self.priv_key.as_deref()),
            priv_proto: or_default(self.priv_proto.as_deref(), NO_PROTOCOL),
        })
    }
}

fn non_empty(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

/// Wire shape. Keys serialize as `null` when absent, never as `""`.
#[derive(Debug, Serialize)]
struct UserBody<'a> {
    user: &'a str,
    name: &'a str,
    auth_key: Option<&'a str>,
    auth_proto: &'a str,
    priv_key: Option<&'a str>,
    priv_proto: &'a str,
}

impl ManagementClient {
    /// `GET users`
    pub async fn get_users(&self, filter: Option<&Filter>) -> Result<Vec<User>, Error> {
        self.list("users", filter).await
    }

    /// `GET users/{id}`
    pub async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.get_one(&format!("users/{id}")).await
    }

    /// `POST users`
    pub async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let body = user.body()?;
        debug!(user = body.user, name = body.name, "creating user");
        self.create("users", &body).await
    }

    /// `POST tags/{tag_id}/users`
    pub async fn create_user_with_tag(&self, user: &NewUser, tag_id: i64) -> Result<User, Error> {
        let body = user.body()?;
        debug!(user = body.user, tag_id, "creating tagged user");
        self.create(&format!("tags/{tag_id}/users"), &body).await
    }

    /// `DELETE users/{id}`
    pub async fn delete_user(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting user");
        self.remove(&format!("users/{id}")).await
    }

    /// `PUT users/{user_id}/tag/{tag_id}`
    pub async fn add_tag_to_user(&self, user_id: i64, tag_id: i64) -> Result<(), Error> {
        self.link(&format!("users/{user_id}/tag/{tag_id}")).await
    }

    /// `DELETE users/{user_id}/tag/{tag_id}`
    pub async fn remove_tag_from_user(&self, user_id: i64, tag_id: i64) -> Result<(), Error> {
        self.remove(&format!("users/{user_id}/tag/{tag_id}")).await
    }
}
