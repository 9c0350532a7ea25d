// src/simulation/config.rs

use serde::Serialize;

use crate::error::SimError;
use crate::model::node::NodeRole;
use crate::strategy::optimization::inverse_normal_cdf;

/// Network design under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Topology {
    /// Manufacturer -> central warehouse -> retailers.
    Centralized,
    /// Manufacturer -> retailers.
    Decentralized,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Centralized, Topology::Decentralized];
}

/// How realized customer demand relates to the correlation `rho`.
///
/// The warehouse safety stock always prices in `rho`; this only picks the
/// generator that produces the simulated draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DemandDraws {
    /// Every retailer draws independently; `rho` is ignored at draw time.
    #[default]
    Independent,
    /// Retailers share a common normal factor so draws are correlated by `rho`.
    CommonFactor,
}

/// The supplier, delay and per-unit freight of one replenishment leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyLink {
    pub supplier: NodeRole,
    pub lead_time: u32,
    pub cost_per_unit: f64,
}

/// Immutable scenario parameters shared by the policy engine, the daily
/// cycle and the replication driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    // General controls
    pub days: u32,
    pub replications: u32,
    pub retailers: usize,
    pub target_fill_rate: f64,
    pub base_seed: u64,

    // Inventory costs (per unit per day)
    pub holding_cost_per_day: f64,
    pub backorder_cost_per_day: f64,

    // Transport costs (per unit)
    pub transport_inbound: f64,  // MFG -> CW
    pub transport_outbound: f64, // CW -> retailer
    pub transport_direct: f64,   // MFG -> retailer

    // Lead times (days)
    pub lead_time_mfg_to_cw: u32,
    pub lead_time_cw_to_retailer: u32,
    pub lead_time_mfg_to_retailer: u32,

    // Demand, identical for every retailer
    pub demand_mean: f64,
    pub demand_sigma: f64,
    pub demand_rho: f64,
    pub realized_demand: DemandDraws,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            days: 365,
            replications: 30,
            retailers: 3,
            target_fill_rate: 0.95,
            base_seed: 42,
            holding_cost_per_day: 0.10,
            backorder_cost_per_day: 5.00,
            transport_inbound: 0.50,
            transport_outbound: 0.25,
            transport_direct: 0.75,
            lead_time_mfg_to_cw: 2,
            lead_time_cw_to_retailer: 1,
            lead_time_mfg_to_retailer: 4,
            demand_mean: 100.0,
            demand_sigma: 30.0,
            demand_rho: 0.0,
            realized_demand: DemandDraws::Independent,
        }
    }
}

impl ScenarioConfig {
    /// Standard normal quantile of the target fill rate.
    pub fn z_score(&self) -> f64 {
        inverse_normal_cdf(self.target_fill_rate)
    }

    /// The leg a retailer replenishes over in `topology`.
    pub fn retailer_link(&self, topology: Topology) -> SupplyLink {
        match topology {
            Topology::Centralized => SupplyLink {
                supplier: NodeRole::Warehouse,
                lead_time: self.lead_time_cw_to_retailer,
                cost_per_unit: self.transport_outbound,
            },
            Topology::Decentralized => SupplyLink {
                supplier: NodeRole::Manufacturer,
                lead_time: self.lead_time_mfg_to_retailer,
                cost_per_unit: self.transport_direct,
            },
        }
    }

    /// The inbound leg of the central warehouse.
    pub fn warehouse_link(&self) -> SupplyLink {
        SupplyLink {
            supplier: NodeRole::Manufacturer,
            lead_time: self.lead_time_mfg_to_cw,
            cost_per_unit: self.transport_inbound,
        }
    }

    /// Checks the scenario before any replication runs.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.days == 0 {
            return Err(SimError::config("days", "horizon must be at least one day"));
        }
        if self.replications == 0 {
            return Err(SimError::config("replications", "must run at least one replication"));
        }
        if self.retailers == 0 {
            return Err(SimError::config("retailers", "need at least one retailer"));
        }
        if !(self.target_fill_rate > 0.0 && self.target_fill_rate < 1.0) {
            return Err(SimError::config(
                "target_fill_rate",
                format!("{} is outside (0, 1)", self.target_fill_rate),
            ));
        }

        let non_negative = [
            ("holding_cost_per_day", self.holding_cost_per_day),
            ("backorder_cost_per_day", self.backorder_cost_per_day),
            ("transport_inbound", self.transport_inbound),
            ("transport_outbound", self.transport_outbound),
            ("transport_direct", self.transport_direct),
            ("demand_mean", self.demand_mean),
            ("demand_sigma", self.demand_sigma),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::config(field, format!("{value} must be finite and >= 0")));
            }
        }

        // A same-day shipment is created after that day's arrivals and would never land.
        let lead_times = [
            ("lead_time_mfg_to_cw", self.lead_time_mfg_to_cw),
            ("lead_time_cw_to_retailer", self.lead_time_cw_to_retailer),
            ("lead_time_mfg_to_retailer", self.lead_time_mfg_to_retailer),
        ];
        for (field, value) in lead_times {
            if value == 0 {
                return Err(SimError::config(field, "lead time must be at least one day"));
            }
        }

        self.validate_rho()
    }

    fn validate_rho(&self) -> Result<(), SimError> {
        let rho = self.demand_rho;
        if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
            return Err(SimError::config("demand_rho", format!("{rho} is outside [-1, 1]")));
        }
        // Pooled variance N + rho N (N-1) must stay non-negative.
        if self.retailers > 1 {
            let floor = -1.0 / (self.retailers as f64 - 1.0);
            if rho < floor {
                return Err(SimError::config(
                    "demand_rho",
                    format!("{rho} is below {floor:.4} for {} retailers", self.retailers),
                ));
            }
        }
        if self.realized_demand == DemandDraws::CommonFactor && rho < 0.0 {
            return Err(SimError::config(
                "demand_rho",
                "common-factor demand draws need rho >= 0",
            ));
        }
        Ok(())
    }
}
