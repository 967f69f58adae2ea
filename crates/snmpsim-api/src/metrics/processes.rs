// Metrics API process endpoints

use crate::error::Error;
use crate::filter::Filter;
use crate::metrics::client::MetricsClient;
use crate::metrics::models::{Console, ProcessEndpoint, ProcessMetrics};

impl MetricsClient {
    /// `GET processes`
    pub async fn get_processes(
        &self,
        filter: Option<&Filter>,
    ) -> Result<Vec<ProcessMetrics>, Error> {
        self.get("processes", filter).await
    }

    /// `GET processes/{id}`
    pub async fn get_process(&self, id: i64) -> Result<ProcessMetrics, Error> {
        self.get(&format!("processes/{id}"), None).await
    }

    /// Transport endpoints served by process `id`.
    ///
    /// `GET processes/{id}/endpoints`
    pub async fn get_process_endpoints(&self, id: i64) -> Result<Vec<ProcessEndpoint>, Error> {
        self.get(&format!("processes/{id}/endpoints"), None).await
    }

    /// `GET processes/{process_id}/endpoints/{endpoint_id}`
    pub async fn get_process_endpoint(
        &self,
        process_id: i64,
        endpoint_id: i64,
    ) -> Result<ProcessEndpoint, Error> {
        self.get(
            &format!("processes/{process_id}/endpoints/{endpoint_id}"),
            None,
        )
        .await
    }

    /// Captured console output of process `id`, one entry per page.
    ///
    /// `GET processes/{id}/console`
    pub async fn get_process_console_pages(&self, id: i64) -> Result<Vec<Console>, Error> {
        self.get(&format!("processes/{id}/console"), None).await
    }

    /// `GET processes/{process_id}/console/{page_id}`
    pub async fn get_process_console_page(
        &self,
        process_id: i64,
        page_id: i64,
    ) -> Result<Console, Error> {
        self.get(&format!("processes/{process_id}/console/{page_id}"), None)
            .await
    }
}
