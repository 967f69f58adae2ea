// Management API agent endpoints

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, or_default, require};
use crate::management::models::Agent;

/// Data directory used when none is given.
pub const DEFAULT_DATA_DIR: &str = ".";

#[derive(Serialize)]
struct NewAgent<'a> {
    name: &'a str,
    data_dir: &'a str,
}

impl<'a> NewAgent<'a> {
    fn new(name: &'a str, data_dir: Option<&'a str>) -> Result<Self, Error> {
        Ok(Self {
            name: require(name, "invalid name")?,
            data_dir: or_default(data_dir, DEFAULT_DATA_DIR),
        })
    }
}

impl ManagementClient {
    /// `GET agents`
    pub async fn get_agents(&self, filter: Option<&Filter>) -> Result<Vec<Agent>, Error> {
        self.list("agents", filter).await
    }

    /// `GET agents/{id}`
    pub async fn get_agent(&self, id: i64) -> Result<Agent, Error> {
        self.get_one(&format!("agents/{id}")).await
    }

    /// Create an agent rooted at `data_dir` (relative to the simulation
    /// data root; `.` when `None` or empty).
    ///
    /// `POST agents`
    pub async fn create_agent(&self, name: &str, data_dir: Option<&str>) -> Result<Agent, Error> {
        let body = NewAgent::new(name, data_dir)?;
        debug!(name = body.name, data_dir = body.data_dir, "creating agent");
        self.create("agents", &body).await
    }

    /// `POST tags/{tag_id}/agents`
    pub async fn create_agent_with_tag(
        &self,
        name: &str,
        data_dir: Option<&str>,
        tag_id: i64,
    ) -> Result<Agent, Error> {
        let body = NewAgent::new(name, data_dir)?;
        debug!(name = body.name, tag_id, "creating tagged agent");
        self.create(&format!("tags/{tag_id}/agents"), &body).await
    }

    /// `DELETE agents/{id}`
    pub async fn delete_agent(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting agent");
        self.remove(&format!("agents/{id}")).await
    }

    /// `PUT agents/{agent_id}/engine/{engine_id}`
    pub async fn add_engine_to_agent(&self, agent_id: i64, engine_id: i64) -> Result<(), Error> {
        debug!(agent_id, engine_id, "adding engine to agent");
        self.link(&format!("agents/{agent_id}/engine/{engine_id}"))
            .await
    }

    /// `DELETE agents/{agent_id}/engine/{engine_id}`
    pub async fn remove_engine_from_agent(
        &self,
        agent_id: i64,
        engine_id: i64,
    ) -> Result<(), Error> {
        debug!(agent_id, engine_id, "removing engine from agent");
        self.remove(&format!("agents/{agent_id}/engine/{engine_id}"))
            .await
    }

    /// `PUT agents/{agent_id}/tag/{tag_id}`
    pub async fn add_tag_to_agent(&self, agent_id: i64, tag_id: i64) -> Result<(), Error> {
        self.link(&format!("agents/{agent_id}/tag/{tag_id}")).await
    }

    /// `DELETE agents/{agent_id}/tag/{tag_id}`
    pub async fn remove_tag_from_agent(&self, agent_id: i64, tag_id: i64) -> Result<(), Error> {
        self.remove(&format!("agents/{agent_id}/tag/{tag_id}"))
            .await
    }
}
