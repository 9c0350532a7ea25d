// src/strategy/base_stock.rs

use log::debug;

use crate::error::SimError;
use crate::model::node::NodeRole;
use crate::simulation::config::{ScenarioConfig, Topology};
use crate::strategy::optimization::{lead_time_base_stock, pooled_base_stock};

/// Order-up-to levels for every stocking node of one topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStockTargets {
    /// Shared by all retailers since they face identical demand.
    pub retailer: u32,
    /// Present only in the centralized design.
    pub warehouse: Option<u32>,
}

impl BaseStockTargets {
    /// Computes the targets of `topology` for one replication.
    ///
    /// Retailers cover the lead time from their immediate supplier. The central
    /// warehouse covers the aggregate demand of all retailers over its inbound
    /// lead time, with the safety term scaled by the pooled standard deviation.
    pub fn compute(config: &ScenarioConfig, topology: Topology) -> Result<Self, SimError> {
        config.validate()?;
        let z = config.z_score();
        let lead_time = config.retailer_link(topology).lead_time;

        let raw = lead_time_base_stock(config.demand_mean, config.demand_sigma, z, lead_time);
        let retailer = round_units(NodeRole::Retailer(0), raw)?;

        let warehouse = match topology {
            Topology::Centralized => {
                let raw = pooled_base_stock(
                    config.retailers,
                    config.demand_mean,
                    config.demand_sigma,
                    config.demand_rho,
                    z,
                    config.warehouse_link().lead_time,
                );
                Some(round_units(NodeRole::Warehouse, raw)?)
            }
            Topology::Decentralized => None,
        };

        debug!(
            "{:?} base stock: retailer S={}, warehouse S={:?} (z={:.4})",
            topology, retailer, warehouse, z
        );
        Ok(Self { retailer, warehouse })
    }
}

/// Rounds half away from zero into whole units.
///
/// A negative target is a configuration error; so is one that is not finite
/// or too large to count in `u32`.
fn round_units(node: NodeRole, value: f64) -> Result<u32, SimError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded > f64::from(u32::MAX) {
        return Err(SimError::BaseStockOutOfRange {
            node: node.to_string(),
            value,
        });
    }
    if rounded < 0.0 {
        return Err(SimError::NegativeBaseStock {
            node: node.to_string(),
            value,
        });
    }
    Ok(rounded as u32)
}

/// Units needed to lift `position` back to `base_stock`.
///
/// Zero or negative means no order; callers only ship positive gaps.
pub fn order_up_to(base_stock: u32, position: i64) -> i64 {
    i64::from(base_stock) - position
}
