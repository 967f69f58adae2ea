// Management API client modules
//
// CRUD over the simulator's control-plane objects: labs, agents, engines,
// endpoints, users, tags, and record files.

pub mod agents;
pub mod client;
pub mod endpoints;
pub mod engines;
pub mod labs;
pub mod models;
pub mod recordings;
pub mod tags;
pub mod users;

pub use client::{MGMT_PREFIX, ManagementClient};
