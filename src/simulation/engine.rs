// src/simulation/engine.rs

use log::{debug, trace};
use serde::Serialize;

use crate::error::SimError;
use crate::io::demand::{demand_generator, DemandGenerator, SimRng};
use crate::model::metrics::Metrics;
use crate::model::node::{NodeRole, NodeState};
use crate::model::shipment::Shipment;
use crate::simulation::config::{ScenarioConfig, Topology};
use crate::strategy::base_stock::BaseStockTargets;

/// Days between debug snapshots of the network.
const SNAPSHOT_INTERVAL: u32 = 30;

// Serialize so the day log can be written to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: u32,
    pub topology: Topology,
    pub node: String,
    pub on_hand: u32,
    pub backorder: u32,
    pub in_transit: u64,
    pub inventory_position: i64,
    pub base_stock: u32,
    pub order_placed: u32,
}

/// The stocking nodes of one topology, owned by a single replication.
#[derive(Debug, Clone)]
pub struct SupplyNetwork {
    pub warehouse: Option<NodeState>,
    pub retailers: Vec<NodeState>,
}

impl SupplyNetwork {
    /// Fresh nodes stocked up to their targets, nothing in flight.
    pub fn stocked(retailers: usize, targets: BaseStockTargets) -> Self {
        Self {
            warehouse: targets
                .warehouse
                .map(|s| NodeState::stocked(NodeRole::Warehouse, s)),
            retailers: (0..retailers)
                .map(|i| NodeState::stocked(NodeRole::Retailer(i), targets.retailer))
                .collect(),
        }
    }

    /// Every stocking node, warehouse first.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeState> {
        self.warehouse.iter().chain(self.retailers.iter())
    }

    fn nodes_mut(&mut self) -> impl Iterator<Item = &mut NodeState> {
        self.warehouse.iter_mut().chain(self.retailers.iter_mut())
    }
}

/// One replication of one topology, advanced a day at a time.
pub struct ChainSimulation<'a> {
    config: &'a ScenarioConfig,
    topology: Topology,

    // The Actors
    network: SupplyNetwork,

    // Inputs
    demand: Box<dyn DemandGenerator>,
    rng: SimRng,
    demand_today: Vec<u32>,

    // Outputs
    metrics: Metrics,
    history: Option<Vec<DayRecord>>,
    current_day: u32,
}

impl<'a> ChainSimulation<'a> {
    /// Computes the base-stock targets of `topology` and stocks a fresh network.
    ///
    /// Fails with [`SimError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &'a ScenarioConfig, topology: Topology, rng: SimRng) -> Result<Self, SimError> {
        config.validate()?;
        let targets = BaseStockTargets::compute(config, topology)?;

        Ok(Self {
            config,
            topology,
            network: SupplyNetwork::stocked(config.retailers, targets),
            demand: demand_generator(config)?,
            rng,
            demand_today: vec![0; config.retailers],
            metrics: Metrics::new(),
            history: None,
            current_day: 1,
        })
    }

    /// Replaces the configured demand generator.
    pub fn with_demand(mut self, demand: Box<dyn DemandGenerator>) -> Self {
        self.demand = demand;
        self
    }

    /// Keeps a [`DayRecord`] per node per day.
    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn network(&self) -> &SupplyNetwork {
        &self.network
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Demand realized on the most recent simulated day.
    pub fn demand_today(&self) -> &[u32] {
        &self.demand_today
    }

    pub fn is_finished(&self) -> bool {
        self.current_day > self.config.days
    }

    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(())
    }

    /// Hands back the accumulated metrics and, if enabled, the day log.
    pub fn finish(self) -> (Metrics, Vec<DayRecord>) {
        (self.metrics, self.history.unwrap_or_default())
    }

    /// Advances the network by one day.
    ///
    /// The phases must run in this order: arrivals, backorder clearing,
    /// demand, warehouse review, retailer reviews, cost accrual.
    pub fn step(&mut self) -> Result<(), SimError> {
        let day = self.current_day;

        // =================================================================
        // PHASE 1: MORNING (Arrivals, then old backorders get first claim)
        // =================================================================
        for node in self.network.nodes_mut() {
            node.receive_shipments(day);
            node.clear_backorders();
            debug_assert!(node.on_hand == 0 || node.backorder == 0);
        }

        // =================================================================
        // PHASE 2: DAY (Customer demand at the retailers)
        // =================================================================
        self.demand.realize_day(day, &mut self.rng, &mut self.demand_today);
        for (retailer, &demand) in self.network.retailers.iter_mut().zip(&self.demand_today) {
            let out = retailer.fulfill_demand(demand);
            self.metrics.record_demand(out.served, out.shortage);
        }

        // =================================================================
        // PHASE 3: EVENING (Base-stock reviews, warehouse before retailers)
        // =================================================================
        if let Some(warehouse) = self.network.warehouse.as_mut() {
            let link = self.config.warehouse_link();
            let placed = warehouse.review(day, link.supplier, link.lead_time, link.cost_per_unit)?;
            record_order(&mut self.metrics, day, placed);
        }

        let link = self.config.retailer_link(self.topology);
        for retailer in self.network.retailers.iter_mut() {
            let placed = retailer.review(day, link.supplier, link.lead_time, link.cost_per_unit)?;
            record_order(&mut self.metrics, day, placed);
        }

        // =================================================================
        // PHASE 4: CLOSE (Charge closing stock and open backorders)
        // =================================================================
        for node in self.network.nodes() {
            let (holding, backorder) = node.daily_cost(
                self.config.holding_cost_per_day,
                self.config.backorder_cost_per_day,
            );
            self.metrics.add_holding_cost(holding);
            self.metrics.add_backorder_cost(backorder);
        }

        if day % SNAPSHOT_INTERVAL == 0 {
            for node in self.network.nodes() {
                debug!("{:?} day {}: {}", self.topology, day, node);
            }
        }
        self.record_history();
        self.current_day += 1;
        Ok(())
    }

    fn record_history(&mut self) {
        let Some(history) = self.history.as_mut() else {
            return;
        };
        for node in self.network.nodes() {
            let order_placed = node
                .last_review
                .filter(|review| review.day == self.current_day)
                .map_or(0, |review| review.quantity);
            history.push(DayRecord {
                day: self.current_day,
                topology: self.topology,
                node: node.role.to_string(),
                on_hand: node.on_hand,
                backorder: node.backorder,
                in_transit: node.pipeline_stock(),
                inventory_position: node.inventory_position(),
                base_stock: node.base_stock,
                order_placed,
            });
        }
    }
}

fn record_order(metrics: &mut Metrics, day: u32, placed: Option<Shipment>) {
    if let Some(sh) = placed {
        trace!(
            "day {}: {} orders {} from {} (arrives day {})",
            day,
            sh.dst(),
            sh.qty(),
            sh.src(),
            sh.arrive_day()
        );
        metrics.add_transport_cost(sh.transport_cost());
        metrics.record_order();
    }
}
