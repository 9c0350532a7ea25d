// src/model/metrics.rs

use serde::Serialize;

/// Cost and service totals for one replication.
///
/// The simulation only ever adds to these counters; ratios are derived on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    // Costs
    holding_cost: f64,
    backorder_cost: f64,
    transport_cost: f64,

    // Service and frequency
    orders_count: u64,
    fill_immediate: u64, // Units served straight from stock
    demand_total: u64,
    backorders_created: u64, // Units that went short on the day they were demanded
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding_cost(&self) -> f64 {
        self.holding_cost
    }

    pub fn backorder_cost(&self) -> f64 {
        self.backorder_cost
    }

    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    pub fn orders_count(&self) -> u64 {
        self.orders_count
    }

    pub fn fill_immediate(&self) -> u64 {
        self.fill_immediate
    }

    pub fn demand_total(&self) -> u64 {
        self.demand_total
    }

    pub fn backorders_created(&self) -> u64 {
        self.backorders_created
    }

    pub fn add_holding_cost(&mut self, cost: f64) {
        self.holding_cost += cost;
    }

    pub fn add_backorder_cost(&mut self, cost: f64) {
        self.backorder_cost += cost;
    }

    pub fn add_transport_cost(&mut self, cost: f64) {
        self.transport_cost += cost;
    }

    pub fn record_order(&mut self) {
        self.orders_count += 1;
    }

    /// Records one demand event: `served` units from stock, `shortage` backordered.
    pub fn record_demand(&mut self, served: u32, shortage: u32) {
        self.fill_immediate += u64::from(served);
        self.backorders_created += u64::from(shortage);
        self.demand_total += u64::from(served) + u64::from(shortage);
    }

    /// Fraction of demand served immediately; 0.0 when nothing was demanded.
    pub fn fill_rate(&self) -> f64 {
        if self.demand_total == 0 {
            return 0.0;
        }
        self.fill_immediate as f64 / self.demand_total as f64
    }

    pub fn total_cost(&self) -> f64 {
        self.holding_cost + self.backorder_cost + self.transport_cost
    }
}

/// Per-day averages of one topology over all replications of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_cost_per_day: f64,
    pub fill_rate: f64,
    pub avg_holding_cost_per_day: f64,
    pub avg_backorder_cost_per_day: f64,
    pub avg_transport_cost_per_day: f64,
    pub avg_orders_per_day: f64,
}

impl SummaryMetrics {
    /// Reduces replication totals to per-day rates over `days * results.len()` days.
    ///
    /// The fill rate pools units across replications (sum of served / sum of demand)
    /// rather than averaging the per-replication ratios.
    pub fn from_replications(results: &[Metrics], days: u32) -> Self {
        if results.is_empty() || days == 0 {
            return Self::default();
        }

        let holding: f64 = results.iter().map(Metrics::holding_cost).sum();
        let backorder: f64 = results.iter().map(Metrics::backorder_cost).sum();
        let transport: f64 = results.iter().map(Metrics::transport_cost).sum();
        let orders: u64 = results.iter().map(Metrics::orders_count).sum();
        let served: u64 = results.iter().map(Metrics::fill_immediate).sum();
        let demand: u64 = results.iter().map(Metrics::demand_total).sum();

        let period = f64::from(days) * results.len() as f64;
        let fill_rate = if demand == 0 {
            0.0
        } else {
            served as f64 / demand as f64
        };

        Self {
            total_cost_per_day: (holding + backorder + transport) / period,
            fill_rate,
            avg_holding_cost_per_day: holding / period,
            avg_backorder_cost_per_day: backorder / period,
            avg_transport_cost_per_day: transport / period,
            avg_orders_per_day: orders as f64 / period,
        }
    }
}
