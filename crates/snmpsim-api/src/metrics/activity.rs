// Metrics API activity endpoints
//
// Packet and message counters, aggregated server-side over whatever
// filters are passed. The filter listing endpoints return an object whose
// keys are the filter names; only the keys are kept.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use tracing::debug;

use crate::error::Error;
use crate::filter::Filter;
use crate::metrics::client::MetricsClient;
use crate::metrics::models::{MessageMetrics, PacketMetrics};

impl MetricsClient {
    /// `GET activity/packets`
    pub async fn get_packets(&self, filter: Option<&Filter>) -> Result<PacketMetrics, Error> {
        self.get("activity/packets", filter).await
    }

    /// Names of the filters `get_packets` accepts, sorted.
    ///
    /// `GET activity/packets/filters`
    pub async fn get_packet_filters(&self) -> Result<Vec<String>, Error> {
        self.filter_names("activity/packets/filters").await
    }

    /// Values currently observed for packet filter `name`.
    ///
    /// `GET activity/packets/filters/{name}`
    pub async fn get_packet_filter_values(&self, name: &str) -> Result<Vec<String>, Error> {
        self.get(&format!("activity/packets/filters/{name}"), None)
            .await
    }

    /// `GET activity/messages`
    pub async fn get_messages(&self, filter: Option<&Filter>) -> Result<MessageMetrics, Error> {
        self.get("activity/messages", filter).await
    }

    /// Names of the filters `get_messages` accepts, sorted.
    ///
    /// `GET activity/messages/filters`
    pub async fn get_message_filters(&self) -> Result<Vec<String>, Error> {
        self.filter_names("activity/messages/filters").await
    }

    /// `GET activity/messages/filters/{name}`
    pub async fn get_message_filter_values(&self, name: &str) -> Result<Vec<String>, Error> {
        self.get(&format!("activity/messages/filters/{name}"), None)
            .await
    }

    async fn filter_names(&self, rel: &str) -> Result<Vec<String>, Error> {
        let filters: BTreeMap<String, IgnoredAny> = self.get(rel, None).await?;
        debug!(count = filters.len(), rel, "fetched filter names");
        Ok(filters.into_keys().collect())
    }
}
