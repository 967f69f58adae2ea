// Management API transport endpoint endpoints

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::management::client::{ManagementClient, or_default, require};
use crate::management::models::Endpoint;

/// Protocol used when none is given.
pub const DEFAULT_PROTOCOL: &str = "udpv4";

#[derive(Serialize)]
struct NewEndpoint<'a> {
    name: &'a str,
    address: &'a str,
    protocol: &'a str,
}

impl<'a> NewEndpoint<'a> {
    fn new(name: &'a str, address: &'a str, protocol: Option<&'a str>) -> Result<Self, Error> {
        Ok(Self {
            name: require(name, "invalid name")?,
            address: require(address, "invalid address")?,
            protocol: or_default(protocol, DEFAULT_PROTOCOL),
        })
    }
}

impl ManagementClient {
    /// `GET endpoints`
    pub async fn get_endpoints(&self, filter: Option<&Filter>) -> Result<Vec<Endpoint>, Error> {
        self.list("endpoints", filter).await
    }

    /// `GET endpoints/{id}`
    pub async fn get_endpoint(&self, id: i64) -> Result<Endpoint, Error> {
        self.get_one(&format!("endpoints/{id}")).await
    }

    /// Create a transport endpoint listening on `address` (`host:port`).
    ///
    /// `POST endpoints`
    pub async fn create_endpoint(
        &self,
        name: &str,
        address: &str,
        protocol: Option<&str>,
    ) -> Result<Endpoint, Error> {
        let body = NewEndpoint::new(name, address, protocol)?;
        debug!(
            name = body.name,
            address = body.address,
            protocol = body.protocol,
            "creating endpoint"
        );
        self.create("endpoints", &body).await
    }

    /// `POST tags/{tag_id}/endpoints`
    pub async fn create_endpoint_with_tag(
        &self,
        name: &str,
        address: &str,
        protocol: Option<&str>,
        tag_id: i64,
    ) -> Result<Endpoint, Error> {
        let body = NewEndpoint::new(name, address, protocol)?;
        debug!(name = body.name, tag_id, "creating tagged endpoint");
        self.create(&format!("tags/{tag_id}/endpoints"), &body)
            .await
    }

    /// `DELETE endpoints/{id}`
    pub async fn delete_endpoint(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting endpoint");
        self.remove(&format!("endpoints/{id}")).await
    }

    /// `PUT endpoints/{endpoint_id}/tag/{tag_id}`
    pub async fn add_tag_to_endpoint(&self, endpoint_id: i64, tag_id: i64) -> Result<(), Error> {
        self.link(&format!("endpoints/{endpoint_id}/tag/{tag_id}"))
            .await
    }

    /// `DELETE endpoints/{endpoint_id}/tag/{tag_id}`
    pub async fn remove_tag_from_endpoint(
        &self,
        endpoint_id: i64,
        tag_id: i64,
    ) -> Result<(), Error> {
        self.remove(&format!("endpoints/{endpoint_id}/tag/{tag_id}"))
            .await
    }
}
