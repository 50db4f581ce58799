#![forbid(unsafe_code)]

//! Aggregating client for the finance risk API.
//!
//! Five domain reads are fanned out per refresh cycle and committed to a
//! single view-state only when all of them succeed.

pub mod client;
pub mod config;
pub mod desk;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod scheduler;
pub mod store;
pub mod transport;
pub mod workflow;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::{check_health, DomainClient};
pub use config::ClientConfig;
pub use desk::RiskDesk;
pub use error::{CycleFailure, TransportError, WorkflowTriggerError};
pub use orchestrator::FetchOrchestrator;
pub use scheduler::RefreshScheduler;
pub use store::{ApplyOutcome, CycleOrigin, CycleTicket, ViewStateStore};
pub use transport::{HttpTransport, InMemoryTransport, Transport};
pub use workflow::{WorkflowExecution, WorkflowTrigger};
