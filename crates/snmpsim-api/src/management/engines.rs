// Management API engine endpoints
//
// Engines carry SNMP identity; users and endpoints attach to them.

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, or_default, require};
use crate::management::models::Engine;

/// Engine ID that asks the service to generate one.
pub const AUTO_ENGINE_ID: &str = "auto";

#[derive(Serialize)]
struct NewEngine<'a> {
    name: &'a str,
    engine_id: &'a str,
}

impl<'a> NewEngine<'a> {
    fn new(name: &'a str, engine_id: Option<&'a str>) -> Result<Self, Error> {
        Ok(Self {
            name: require(name, "invalid name")?,
            engine_id: or_default(engine_id, AUTO_ENGINE_ID),
        })
    }
}

impl ManagementClient {
    /// `GET engines`
    pub async fn get_engines(&self, filter: Option<&Filter>) -> Result<Vec<Engine>, Error> {
        self.list("engines", filter).await
    }

    /// `GET engines/{id}`
    pub async fn get_engine(&self, id: i64) -> Result<Engine, Error> {
        self.get_one(&format!("engines/{id}")).await
    }

    /// Create an engine. A `None` or empty `engine_id` lets the service
    /// generate one.
    ///
    /// `POST engines`
    pub async fn create_engine(
        &self,
        name: &str,
        engine_id: Option<&str>,
    ) -> Result<Engine, Error> {
        let body = NewEngine::new(name, engine_id)?;
        debug!(name = body.name, engine_id = body.engine_id, "creating engine");
        self.create("engines", &body).await
    }

    /// `POST tags/{tag_id}/engines`
    pub async fn create_engine_with_tag(
        &self,
        name: &str,
        engine_id: Option<&str>,
        tag_id: i64,
    ) -> Result<Engine, Error> {
        let body = NewEngine::new(name, engine_id)?;
        debug!(name = body.name, tag_id, "creating tagged engine");
        self.create(&format!("tags/{tag_id}/engines"), &body).await
    }

    /// `DELETE engines/{id}`
    pub async fn delete_engine(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting engine");
        self.remove(&format!("engines/{id}")).await
    }

    /// `PUT engines/{engine_id}/user/{user_id}`
    pub async fn add_user_to_engine(&self, engine_id: i64, user_id: i64) -> Result<(), Error> {
        debug!(engine_id, user_id, "adding user to engine");
        self.link(&format!("engines/{engine_id}/user/{user_id}"))
            .await
    }

    /// `DELETE engines/{engine_id}/user/{user_id}`
    pub async fn remove_user_from_engine(
        &self,
        engine_id: i64,
        user_id: i64,
    ) -> Result<(), Error> {
        debug!(engine_id, user_id, "removing user from engine");
        self.remove(&format!("engines/{engine_id}/user/{user_id}"))
            .await
    }

    /// `PUT engines/{engine_id}/endpoint/{endpoint_id}`
    pub async fn add_endpoint_to_engine(
        &self,
        engine_id: i64,
        endpoint_id: i64,
    ) -> Result<(), Error> {
        debug!(engine_id, endpoint_id, "adding endpoint to engine");
        self.link(&format!("engines/{engine_id}/endpoint/{endpoint_id}"))
            .await
    }

    /// `DELETE engines/{engine_id}/endpoint/{endpoint_id}`
    pub async fn remove_endpoint_from_engine(
        &self,
        engine_id: i64,
        endpoint_id: i64,
    ) -> Result<(), Error> {
        debug!(engine_id, endpoint_id, "removing endpoint from engine");
        self.remove(&format!("engines/{engine_id}/endpoint/{endpoint_id}"))
            .await
    }

    /// `PUT engines/{engine_id}/tag/{tag_id}`
    pub async fn add_tag_to_engine(&self, engine_id: i64, tag_id: i64) -> Result<(), Error> {
        self.link(&format!("engines/{engine_id}/tag/{tag_id}"))
            .await
    }

    /// `DELETE engines/{engine_id}/tag/{tag_id}`
    pub async fn remove_tag_from_engine(&self, engine_id: i64, tag_id: i64) -> Result<(), Error> {
        self.remove(&format!("engines/{engine_id}/tag/{tag_id}"))
            .await
    }
}
