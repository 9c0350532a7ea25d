// src/model/shipment.rs

use crate::error::SimError;
use crate::model::node::NodeRole;

/// Stock moving between two nodes.
///
/// Once built a shipment never changes; it leaves its destination's pipeline
/// on the day it arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shipment {
    qty: u32,
    src: NodeRole,
    dst: NodeRole,
    arrive_day: u32,
    cost_per_unit: f64,
}

impl Shipment {
    /// Creates a shipment of `qty` units arriving at `dst` on `arrive_day`.
    ///
    /// Fails with [`SimError::InvalidArgument`] unless `qty` is strictly positive.
    pub fn new(
        qty: i64,
        src: NodeRole,
        dst: NodeRole,
        arrive_day: u32,
        cost_per_unit: f64,
    ) -> Result<Self, SimError> {
        if qty <= 0 {
            return Err(SimError::InvalidArgument(format!(
                "shipment quantity must be positive, got {qty}"
            )));
        }
        let qty = u32::try_from(qty).map_err(|_| {
            SimError::InvalidArgument(format!("shipment quantity {qty} does not fit in u32"))
        })?;

        Ok(Self {
            qty,
            src,
            dst,
            arrive_day,
            cost_per_unit,
        })
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    pub fn src(&self) -> NodeRole {
        self.src
    }

    pub fn dst(&self) -> NodeRole {
        self.dst
    }

    pub fn arrive_day(&self) -> u32 {
        self.arrive_day
    }

    pub fn cost_per_unit(&self) -> f64 {
        self.cost_per_unit
    }

    /// Transport cost of the whole shipment, charged once when it is created.
    pub fn transport_cost(&self) -> f64 {
        self.qty as f64 * self.cost_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_quantity() {
        for qty in [0, -1, -250] {
            let result = Shipment::new(qty, NodeRole::Manufacturer, NodeRole::Warehouse, 3, 0.5);
            assert!(matches!(result, Err(SimError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_transport_cost_is_quantity_times_rate() {
        let sh = Shipment::new(40, NodeRole::Warehouse, NodeRole::Retailer(0), 5, 0.25).unwrap();
        assert_eq!(sh.qty(), 40);
        assert_eq!(sh.arrive_day(), 5);
        assert_eq!(sh.dst(), NodeRole::Retailer(0));
        assert!((sh.transport_cost() - 10.0).abs() < 1e-12);
    }
}
