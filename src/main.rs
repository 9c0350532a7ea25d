use std::error::Error;
use std::io;

use log::info;

use inventory_pooling::cli::{self, USAGE};
use inventory_pooling::io::reporting::{self, SummaryRow};
use inventory_pooling::simulation::replication::{compare_topologies, trace_replication};
use inventory_pooling::{ScenarioConfig, Topology};

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::parse_args()?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let scenarios = args.scenarios(&ScenarioConfig::default());

    // 1. PER-DAY LOG (first replication of each design only)
    if args.history {
        let mut history = Vec::new();
        for config in &scenarios {
            config.validate()?;
            for topology in Topology::ALL {
                let (_, records) = trace_replication(config, topology, 0)?;
                history.extend(records);
            }
        }
        reporting::write_history(io::stdout().lock(), &history)?;
        return Ok(());
    }

    // 2. RUN EVERY SCENARIO UNDER BOTH DESIGNS
    info!("=== Inventory Centralization vs. Decentralization ===");
    let mut rows = Vec::new();
    for (i, config) in scenarios.iter().enumerate() {
        let label = format!("scenario_{}", i + 1);
        let comparison = compare_topologies(config)?;

        if args.csv {
            rows.extend(SummaryRow::pair(&label, config.demand_rho, &comparison));
        } else {
            let title = format!(
                "\n{label}: rho = {}, {} retailers, averaged over {} replications x {} days",
                config.demand_rho, config.retailers, config.replications, config.days
            );
            print!(
                "{}",
                reporting::format_comparison(
                    &title,
                    &comparison.centralized.summary,
                    &comparison.decentralized.summary
                )
            );
        }
    }

    // 3. EXPORT
    if args.csv {
        reporting::write_summary_csv(io::stdout().lock(), &rows)?;
    }

    Ok(())
}
