// src/simulation/replication.rs

use log::{debug, info};

use crate::error::SimError;
use crate::io::demand::replication_rng;
use crate::model::metrics::{Metrics, SummaryMetrics};
use crate::simulation::config::{ScenarioConfig, Topology};
use crate::simulation::engine::{ChainSimulation, DayRecord};

/// All replications of one topology under one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationResults {
    pub topology: Topology,
    pub runs: Vec<Metrics>,
    pub summary: SummaryMetrics,
}

/// Side-by-side results of both designs under the same scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub centralized: ReplicationResults,
    pub decentralized: ReplicationResults,
}

/// Runs replication `index` of `topology` from a freshly stocked network.
///
/// The random stream depends only on `config.base_seed` and `index`, so both
/// topologies of a replication face the same demand when draws are independent.
pub fn run_replication(
    config: &ScenarioConfig,
    topology: Topology,
    index: u32,
) -> Result<Metrics, SimError> {
    let mut sim = ChainSimulation::new(config, topology, replication_rng(config.base_seed, index))?;
    sim.run()?;
    let (metrics, _) = sim.finish();
    Ok(metrics)
}

/// Same as [`run_replication`] but also returns the per-day node log.
pub fn trace_replication(
    config: &ScenarioConfig,
    topology: Topology,
    index: u32,
) -> Result<(Metrics, Vec<DayRecord>), SimError> {
    let mut sim = ChainSimulation::new(config, topology, replication_rng(config.base_seed, index))?
        .with_history();
    sim.run()?;
    Ok(sim.finish())
}

/// Runs `config.replications` independent replications of `topology` and
/// reduces them to per-day averages.
pub fn run_replications(
    config: &ScenarioConfig,
    topology: Topology,
) -> Result<ReplicationResults, SimError> {
    config.validate()?;
    info!(
        "Running {} replications x {} days ({:?}, {} retailers, rho={})",
        config.replications, config.days, topology, config.retailers, config.demand_rho
    );

    let mut runs = Vec::with_capacity(config.replications as usize);
    for index in 0..config.replications {
        let metrics = run_replication(config, topology, index)?;
        debug!(
            "{:?} replication {}: total cost {:.2}, fill rate {:.4}, orders {}",
            topology,
            index,
            metrics.total_cost(),
            metrics.fill_rate(),
            metrics.orders_count()
        );
        runs.push(metrics);
    }

    let summary = SummaryMetrics::from_replications(&runs, config.days);
    info!(
        "{:?}: {:.2} per day, fill rate {:.3}",
        topology, summary.total_cost_per_day, summary.fill_rate
    );

    Ok(ReplicationResults {
        topology,
        runs,
        summary,
    })
}

/// Evaluates both topologies under the same scenario.
pub fn compare_topologies(config: &ScenarioConfig) -> Result<Comparison, SimError> {
    Ok(Comparison {
        centralized: run_replications(config, Topology::Centralized)?,
        decentralized: run_replications(config, Topology::Decentralized)?,
    })
}
