// Management API lab endpoints
//
// Labs group agents; powering a lab on starts every agent in it.

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, require};
use crate::management::models::Lab;

#[derive(Serialize)]
struct NewLab<'a> {
    name: &'a str,
}

impl ManagementClient {
    /// List labs, optionally filtered server-side.
    ///
    /// `GET labs`
    pub async fn get_labs(&self, filter: Option<&Filter>) -> Result<Vec<Lab>, Error> {
        self.list("labs", filter).await
    }

    /// `GET labs/{id}`
    pub async fn get_lab(&self, id: i64) -> Result<Lab, Error> {
        self.get_one(&format!("labs/{id}")).await
    }

    /// `POST labs` with `{"name": ...}`
    pub async fn create_lab(&self, name: &str) -> Result<Lab, Error> {
        let name = require(name, "invalid name")?;
        debug!(name, "creating lab");
        self.create("labs", &NewLab { name }).await
    }

    /// Create a lab already tagged with `tag_id`.
    ///
    /// `POST tags/{tag_id}/labs`
    pub async fn create_lab_with_tag(&self, name: &str, tag_id: i64) -> Result<Lab, Error> {
        let name = require(name, "invalid name")?;
        debug!(name, tag_id, "creating tagged lab");
        self.create(&format!("tags/{tag_id}/labs"), &NewLab { name })
            .await
    }

    /// `DELETE labs/{id}`
    pub async fn delete_lab(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting lab");
        self.remove(&format!("labs/{id}")).await
    }

    /// `PUT labs/{lab_id}/agent/{agent_id}`
    pub async fn add_agent_to_lab(&self, lab_id: i64, agent_id: i64) -> Result<(), Error> {
        debug!(lab_id, agent_id, "adding agent to lab");
        self.link(&format!("labs/{lab_id}/agent/{agent_id}")).await
    }

    /// `DELETE labs/{lab_id}/agent/{agent_id}`
    pub async fn remove_agent_from_lab(&self, lab_id: i64, agent_id: i64) -> Result<(), Error> {
        debug!(lab_id, agent_id, "removing agent from lab");
        self.remove(&format!("labs/{lab_id}/agent/{agent_id}"))
            .await
    }

    /// Power a lab on or off.
    ///
    /// `PUT labs/{id}/power/{on|off}`
    pub async fn set_lab_power(&self, id: i64, power: bool) -> Result<(), Error> {
        let state = if power { "on" } else { "off" };
        debug!(id, state, "setting lab power");
        self.link(&format!("labs/{id}/power/{state}")).await
    }

    /// `PUT labs/{lab_id}/tag/{tag_id}`
    pub async fn add_tag_to_lab(&self, lab_id: i64, tag_id: i64) -> Result<(), Error> {
        self.link(&format!("labs/{lab_id}/tag/{tag_id}")).await
    }

    /// `DELETE labs/{lab_id}/tag/{tag_id}`
    pub async fn remove_tag_from_lab(&self, lab_id: i64, tag_id: i64) -> Result<(), Error> {
        self.remove(&format!("labs/{lab_id}/tag/{tag_id}")).await
    }
}
