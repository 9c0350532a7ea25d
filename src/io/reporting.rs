// src/io/reporting.rs

use std::fmt::{self, Write as _};
use std::io::Write;

use serde::Serialize;

use crate::error::SimError;
use crate::model::metrics::SummaryMetrics;
use crate::simulation::config::Topology;
use crate::simulation::engine::DayRecord;
use crate::simulation::replication::Comparison;

/// One CSV line per topology per scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub scenario: String,
    pub topology: Topology,
    pub rho: f64,
    pub total_cost_per_day: f64,
    pub fill_rate: f64,
    pub avg_holding_cost_per_day: f64,
    pub avg_backorder_cost_per_day: f64,
    pub avg_transport_cost_per_day: f64,
    pub avg_orders_per_day: f64,
}

impl SummaryRow {
    pub fn new(scenario: &str, topology: Topology, rho: f64, summary: &SummaryMetrics) -> Self {
        Self {
            scenario: scenario.to_string(),
            topology,
            rho,
            total_cost_per_day: summary.total_cost_per_day,
            fill_rate: summary.fill_rate,
            avg_holding_cost_per_day: summary.avg_holding_cost_per_day,
            avg_backorder_cost_per_day: summary.avg_backorder_cost_per_day,
            avg_transport_cost_per_day: summary.avg_transport_cost_per_day,
            avg_orders_per_day: summary.avg_orders_per_day,
        }
    }

    /// Both rows of a scenario, centralized first.
    pub fn pair(scenario: &str, rho: f64, comparison: &Comparison) -> [Self; 2] {
        [
            Self::new(scenario, Topology::Centralized, rho, &comparison.centralized.summary),
            Self::new(scenario, Topology::Decentralized, rho, &comparison.decentralized.summary),
        ]
    }
}

/// Writes summary rows as CSV with a header line.
pub fn write_summary_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the per-day node log of a traced replication as CSV.
pub fn write_history<W: Write>(writer: W, data: &[DayRecord]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

const RULE_WIDTH: usize = 55;

/// Fixed-width METRIC | CENTRALIZED | DECENTRALIZED table.
pub fn format_comparison(title: &str, central: &SummaryMetrics, direct: &SummaryMetrics) -> String {
    let mut out = String::new();
    write_table(&mut out, title, central, direct).expect("writing to a String cannot fail");
    out
}

fn write_table(
    out: &mut String,
    title: &str,
    central: &SummaryMetrics,
    direct: &SummaryMetrics,
) -> fmt::Result {
    let rule = "-".repeat(RULE_WIDTH);
    let money = [
        ("Holding Cost / Day", central.avg_holding_cost_per_day, direct.avg_holding_cost_per_day),
        ("Backorder Cost / Day", central.avg_backorder_cost_per_day, direct.avg_backorder_cost_per_day),
        ("Transport Cost / Day", central.avg_transport_cost_per_day, direct.avg_transport_cost_per_day),
    ];

    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:<20} | {:<15} | {:<15}", "METRIC", "CENTRALIZED", "DECENTRALIZED")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<20} | {:<15.2} | {:<15.2}",
        "Total Cost / Day", central.total_cost_per_day, direct.total_cost_per_day
    )?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<20} | {:<15.3} | {:<15.3}",
        "Fill Rate (beta)", central.fill_rate, direct.fill_rate
    )?;
    for (label, c, d) in money {
        writeln!(out, "{label:<20} | {c:<15.2} | {d:<15.2}")?;
    }
    writeln!(
        out,
        "{:<20} | {:<15.2} | {:<15.2}",
        "Orders Per Day", central.avg_orders_per_day, direct.avg_orders_per_day
    )?;
    writeln!(out, "{rule}")
}
