// src/model/node.rs

use std::fmt;

use serde::Serialize;

use crate::error::SimError;
use crate::model::shipment::Shipment;
use crate::strategy::base_stock::order_up_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeRole {
    Manufacturer,
    Warehouse,
    /// Zero-based retailer index.
    Retailer(usize),
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Manufacturer => write!(f, "MFG"),
            NodeRole::Warehouse => write!(f, "CW"),
            NodeRole::Retailer(i) => write!(f, "Retailer_{}", i + 1),
        }
    }
}

/// Result of the most recent base-stock review at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReview {
    pub day: u32,
    /// Inventory position the order was sized against.
    pub position: i64,
    pub base_stock: u32,
    /// Units ordered, 0 when the position was already at or above target.
    pub quantity: u32,
}

/// Units served from stock and units pushed into backorder by one demand event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fulfilment {
    pub served: u32,
    pub shortage: u32,
}

/// The inventory ledger of a single location in the network.
#[derive(Debug, Clone)]
pub struct NodeState {
    // Identity
    pub role: NodeRole,

    // State Variables
    pub on_hand: u32,
    pub backorder: u32,
    in_transit: Vec<Shipment>, // Inbound shipments owned by this node

    // Policy
    pub base_stock: u32,

    // Audit
    pub last_review: Option<OrderReview>,
}

impl NodeState {
    pub fn new(role: NodeRole) -> Self {
        Self {
            role,
            on_hand: 0,
            backorder: 0,
            in_transit: Vec::new(),
            base_stock: 0,
            last_review: None,
        }
    }

    /// A node at the start of a replication: stocked up to its target, nothing owed or in flight.
    pub fn stocked(role: NodeRole, base_stock: u32) -> Self {
        let mut node = Self::new(role);
        node.reset(base_stock);
        node
    }

    pub fn reset(&mut self, base_stock: u32) {
        self.base_stock = base_stock;
        self.on_hand = base_stock;
        self.backorder = 0;
        self.in_transit.clear();
        self.last_review = None;
    }

    pub fn in_transit(&self) -> &[Shipment] {
        &self.in_transit
    }

    /// Total units ordered but not yet received.
    pub fn pipeline_stock(&self) -> u64 {
        self.in_transit.iter().map(|sh| u64::from(sh.qty())).sum()
    }

    /// IP = on hand + in transit - backorder.
    pub fn inventory_position(&self) -> i64 {
        i64::from(self.on_hand) + self.pipeline_stock() as i64 - i64::from(self.backorder)
    }

    /// Step 1: Move every shipment due today into on-hand stock.
    ///
    /// Returns the number of units received.
    pub fn receive_shipments(&mut self, day: u32) -> u32 {
        let mut received = 0;
        self.in_transit.retain(|sh| {
            if sh.arrive_day() == day {
                received += sh.qty();
                false
            } else {
                true
            }
        });
        self.on_hand += received;
        received
    }

    /// Step 2: Use available stock to pay down the backorder liability.
    ///
    /// Afterwards at most one of `on_hand` and `backorder` is non-zero.
    pub fn clear_backorders(&mut self) -> u32 {
        let cleared = self.on_hand.min(self.backorder);
        self.on_hand -= cleared;
        self.backorder -= cleared;
        cleared
    }

    /// Step 3: Serve customer demand from stock, backordering the rest.
    pub fn fulfill_demand(&mut self, demand: u32) -> Fulfilment {
        let served = self.on_hand.min(demand);
        let shortage = demand - served;
        self.on_hand -= served;
        self.backorder += shortage;
        Fulfilment { served, shortage }
    }

    /// Steps 4/5: Periodic base-stock review against `supplier`.
    ///
    /// Orders `base_stock - IP` units when that is positive; the shipment is
    /// added to this node's pipeline and a copy is returned for cost accounting.
    pub fn review(
        &mut self,
        day: u32,
        supplier: NodeRole,
        lead_time: u32,
        cost_per_unit: f64,
    ) -> Result<Option<Shipment>, SimError> {
        let position = self.inventory_position();
        let gap = order_up_to(self.base_stock, position);

        let shipment = if gap > 0 {
            let sh = Shipment::new(gap, supplier, self.role, day + lead_time, cost_per_unit)?;
            self.in_transit.push(sh);
            Some(sh)
        } else {
            None
        };

        self.last_review = Some(OrderReview {
            day,
            position,
            base_stock: self.base_stock,
            quantity: shipment.map_or(0, |sh| sh.qty()),
        });
        Ok(shipment)
    }

    /// Holding and backorder charge for carrying today's closing state.
    pub fn daily_cost(&self, holding_rate: f64, backorder_rate: f64) -> (f64, f64) {
        (
            self.on_hand as f64 * holding_rate,
            self.backorder as f64 * backorder_rate,
        )
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: OH={}, BO={}, IT={}, IP={}, S={}",
            self.role,
            self.on_hand,
            self.backorder,
            self.pipeline_stock(),
            self.inventory_position(),
            self.base_stock
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(NodeRole::Manufacturer.to_string(), "MFG");
        assert_eq!(NodeRole::Warehouse.to_string(), "CW");
        assert_eq!(NodeRole::Retailer(0).to_string(), "Retailer_1");
    }

    #[test]
    fn test_receive_only_due_shipments() {
        let mut node = NodeState::stocked(NodeRole::Retailer(0), 10);
        node.review(1, NodeRole::Manufacturer, 2, 1.0).unwrap(); // no gap, nothing ordered
        node.on_hand = 0;
        node.review(1, NodeRole::Manufacturer, 2, 1.0).unwrap(); // 10 units due day 3
        node.on_hand = 0;
        node.backorder = 5;
        node.review(2, NodeRole::Manufacturer, 2, 1.0).unwrap(); // 5 units due day 4

        assert_eq!(node.in_transit().len(), 2);
        assert_eq!(node.receive_shipments(2), 0);
        assert_eq!(node.receive_shipments(3), 10);
        assert_eq!(node.on_hand, 10);
        assert_eq!(node.in_transit().len(), 1);
        assert_eq!(node.in_transit()[0].arrive_day(), 4);
    }

    #[test]
    fn test_clear_backorders_leaves_one_side_zero() {
        let mut node = NodeState::new(NodeRole::Retailer(0));
        node.on_hand = 30;
        node.backorder = 50;
        assert_eq!(node.clear_backorders(), 30);
        assert_eq!((node.on_hand, node.backorder), (0, 20));

        node.on_hand = 45;
        assert_eq!(node.clear_backorders(), 20);
        assert_eq!((node.on_hand, node.backorder), (25, 0));

        assert_eq!(node.clear_backorders(), 0);
    }

    #[test]
    fn test_fulfill_demand_splits_served_and_shortage() {
        let mut node = NodeState::stocked(NodeRole::Retailer(1), 80);
        let out = node.fulfill_demand(100);
        assert_eq!(out, Fulfilment { served: 80, shortage: 20 });
        assert_eq!(node.on_hand, 0);
        assert_eq!(node.backorder, 20);

        node.on_hand = 50;
        let out = node.fulfill_demand(0);
        assert_eq!(out, Fulfilment::default());
        assert_eq!(node.on_hand, 50);
    }

    #[test]
    fn test_review_orders_up_to_base_stock() {
        let mut node = NodeState::stocked(NodeRole::Retailer(0), 200);
        node.on_hand = 40;
        node.backorder = 0;

        let sh = node
            .review(7, NodeRole::Warehouse, 1, 0.25)
            .unwrap()
            .expect("position below target must order");
        assert_eq!(sh.qty(), 160);
        assert_eq!(sh.arrive_day(), 8);
        assert_eq!(sh.src(), NodeRole::Warehouse);
        assert_eq!(node.inventory_position(), 200);

        let review = node.last_review.unwrap();
        assert_eq!(review.position, 40);
        assert_eq!(review.quantity, 160);

        // Already at target: no shipment, but the review is still recorded.
        assert!(node.review(8, NodeRole::Warehouse, 1, 0.25).unwrap().is_none());
        assert_eq!(node.last_review.unwrap().quantity, 0);
        assert_eq!(node.in_transit().len(), 1);
    }

    #[test]
    fn test_position_counts_backorders() {
        let mut node = NodeState::stocked(NodeRole::Retailer(0), 100);
        node.on_hand = 0;
        node.backorder = 30;
        assert_eq!(node.inventory_position(), -30);
        let sh = node.review(1, NodeRole::Manufacturer, 4, 0.75).unwrap().unwrap();
        assert_eq!(sh.qty(), 130);
    }

    #[test]
    fn test_reset_restores_opening_state() {
        let mut node = NodeState::stocked(NodeRole::Warehouse, 50);
        node.on_hand = 3;
        node.backorder = 9;
        node.review(1, NodeRole::Manufacturer, 2, 0.5).unwrap();
        node.reset(75);
        assert_eq!(node.on_hand, 75);
        assert_eq!(node.backorder, 0);
        assert!(node.in_transit().is_empty());
        assert!(node.last_review.is_none());
    }

    #[test]
    fn test_display() {
        let mut node = NodeState::stocked(NodeRole::Warehouse, 600);
        node.on_hand = 550;
        assert_eq!(node.to_string(), "CW: OH=550, BO=0, IT=0, IP=550, S=600");
    }
}
