// snmpsim-api: Async Rust client for the SNMP simulator control plane
// (management and metrics REST APIs)

mod de;
pub mod error;
pub mod filter;
pub mod management;
pub mod metrics;
pub mod path;
pub mod transport;

pub use error::{Error, ErrorResponse, HttpError};
pub use filter::Filter;
pub use management::models::{
    Agent, Endpoint, Engine, Lab, Recording, Selector, Tag, User, has_tag,
};
pub use management::recordings::{RECORD_FILE_EXTENSION, validate_record_path};
pub use management::users::NewUser;
pub use management::{MGMT_PREFIX, ManagementClient};
pub use metrics::models::{
    Console, ConsolePages, MessageMetrics, PacketMetrics, ProcessEndpoint, ProcessLifeCycle,
    ProcessMetrics, Supervisor, Variation,
};
pub use metrics::{METRICS_PREFIX, MetricsClient};
pub use path::escape_path;
pub use transport::{TlsMode, Transport, TransportConfig};
