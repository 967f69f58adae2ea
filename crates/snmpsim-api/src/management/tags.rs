// Management API tag endpoints
//
// Tags label any control-plane object. Per-resource tag/untag calls sit
// next to their resource; this file covers the tag objects themselves and
// the bulk purge.

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, require};
use crate::management::models::Tag;

#[derive(Serialize)]
struct NewTag<'a> {
    name: &'a str,
    description: &'a str,
}

impl ManagementClient {
    /// `GET tags`
    pub async fn get_tags(&self, filter: Option<&Filter>) -> Result<Vec<Tag>, Error> {
        self.list("tags", filter).await
    }

    /// `GET tags/{id}`
    pub async fn get_tag(&self, id: i64) -> Result<Tag, Error> {
        self.get_one(&format!("tags/{id}")).await
    }

    /// `POST tags`
    pub async fn create_tag(&self, name: &str, description: &str) -> Result<Tag, Error> {
        let name = require(name, "invalid name")?;
        debug!(name, "creating tag");
        self.create("tags", &NewTag { name, description }).await
    }

    /// Delete the tag itself. Tagged objects stay.
    ///
    /// `DELETE tags/{id}`
    pub async fn delete_tag(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting tag");
        self.remove(&format!("tags/{id}")).await
    }

    /// Delete every object carrying the tag. The tag survives; the
    /// returned snapshot lists what was removed.
    ///
    /// `DELETE tags/{id}/objects`
    pub async fn delete_all_objects_with_tag(&self, id: i64) -> Result<Tag, Error> {
        debug!(id, "deleting all objects with tag");
        self.remove_with_response(&format!("tags/{id}/objects"))
            .await
    }
}
