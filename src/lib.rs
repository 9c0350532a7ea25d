//! Discrete-time inventory simulation comparing a centralized
//! (manufacturer -> central warehouse -> retailers) and a decentralized
//! (manufacturer -> retailers) supply chain under base-stock replenishment.

pub mod cli;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::SimError;
pub use model::metrics::{Metrics, SummaryMetrics};
pub use simulation::config::{DemandDraws, ScenarioConfig, Topology};
pub use simulation::replication::{compare_topologies, run_replications, Comparison};
