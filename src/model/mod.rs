pub mod metrics;
pub mod node;
pub mod shipment;
