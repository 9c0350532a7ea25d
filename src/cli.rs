//! Command-line interface for the centralization experiment.

use lexopt::prelude::*;

use crate::simulation::config::{DemandDraws, ScenarioConfig};

pub const USAGE: &str = "\
Usage: inventory-pooling [OPTIONS]

Compares a centralized (MFG -> CW -> retailers) and a decentralized
(MFG -> retailers) network over many replications.

Options:
  -d, --days <N>            Days per replication
  -r, --replications <N>    Replications per topology
  -n, --retailers <N>       Number of retailers
      --seed <N>            Base random seed
      --fill-rate <P>       Target fill rate in (0, 1)
      --rho <R>             Demand correlation; repeat to sweep several scenarios
      --correlated-demand   Draw correlated demand instead of independent draws
      --csv                 Print summary rows as CSV instead of tables
      --history             Print the per-day log of the first replication as CSV
  -v, --verbose             Debug logging
  -h, --help                Show this message";

#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub days: Option<u32>,
    pub replications: Option<u32>,
    pub retailers: Option<usize>,
    pub seed: Option<u64>,
    pub fill_rate: Option<f64>,
    pub rhos: Vec<f64>,
    pub correlated_demand: bool,
    pub csv: bool,
    pub history: bool,
    pub verbose: bool,
    pub help: bool,
}

impl CliArgs {
    /// Applies the overrides to `base`, yielding one scenario per `--rho`.
    pub fn scenarios(&self, base: &ScenarioConfig) -> Vec<ScenarioConfig> {
        let mut config = base.clone();
        if let Some(days) = self.days {
            config.days = days;
        }
        if let Some(replications) = self.replications {
            config.replications = replications;
        }
        if let Some(retailers) = self.retailers {
            config.retailers = retailers;
        }
        if let Some(seed) = self.seed {
            config.base_seed = seed;
        }
        if let Some(fill_rate) = self.fill_rate {
            config.target_fill_rate = fill_rate;
        }
        if self.correlated_demand {
            config.realized_demand = DemandDraws::CommonFactor;
        }

        if self.rhos.is_empty() {
            return vec![config];
        }
        self.rhos
            .iter()
            .map(|&rho| ScenarioConfig {
                demand_rho: rho,
                ..config.clone()
            })
            .collect()
    }
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(lexopt::Parser::from_env())
}

fn parse_from(mut parser: lexopt::Parser) -> Result<CliArgs, lexopt::Error> {
    let mut args = CliArgs::default();

    while let Some(arg) = parser.next()? {
        match arg {
            Long("days") | Short('d') => args.days = Some(parser.value()?.parse()?),
            Long("replications") | Short('r') => {
                args.replications = Some(parser.value()?.parse()?)
            }
            Long("retailers") | Short('n') => args.retailers = Some(parser.value()?.parse()?),
            Long("seed") => args.seed = Some(parser.value()?.parse()?),
            Long("fill-rate") => args.fill_rate = Some(parser.value()?.parse()?),
            Long("rho") => args.rhos.push(parser.value()?.parse()?),
            Long("correlated-demand") => args.correlated_demand = true,
            Long("csv") => args.csv = true,
            Long("history") => args.history = true,
            Long("verbose") | Short('v') => args.verbose = true,
            Long("help") | Short('h') => args.help = true,
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, lexopt::Error> {
        parse_from(lexopt::Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_overrides_and_rho_sweep() {
        let args = parse(&["-d", "90", "--replications", "5", "--rho", "0", "--rho", "0.5", "--csv"]).unwrap();
        assert_eq!(args.days, Some(90));
        assert_eq!(args.replications, Some(5));
        assert!(args.csv);

        let scenarios = args.scenarios(&ScenarioConfig::default());
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[1].demand_rho, 0.5);
        assert!(scenarios.iter().all(|c| c.days == 90 && c.replications == 5));
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.scenarios(&ScenarioConfig::default()), vec![ScenarioConfig::default()]);
    }

    #[test]
    fn test_correlated_flag_switches_generator() {
        let args = parse(&["--correlated-demand", "--rho", "0.3"]).unwrap();
        let scenario = &args.scenarios(&ScenarioConfig::default())[0];
        assert_eq!(scenario.realized_demand, DemandDraws::CommonFactor);
    }

    #[test]
    fn test_rejects_unknown_and_malformed() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--days", "many"]).is_err());
    }
}
