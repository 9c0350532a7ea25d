// src/io/demand.rs

use std::fmt::Debug;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::error::SimError;
use crate::simulation::config::{DemandDraws, ScenarioConfig};

/// Random source owned by a single replication.
pub type SimRng = ChaCha8Rng;

/// Deterministic stream for replication `index` of a run seeded with `base_seed`.
pub fn replication_rng(base_seed: u64, index: u32) -> SimRng {
    SimRng::seed_from_u64(base_seed.wrapping_add(u64::from(index)))
}

/// Produces one day of customer demand for every retailer.
///
/// The random source is always supplied by the caller so that each
/// replication draws from its own stream.
pub trait DemandGenerator: Debug + Send {
    /// Fills `demand[i]` with the units retailer `i` sells on `day`.
    fn realize_day(&mut self, day: u32, rng: &mut SimRng, demand: &mut [u32]);
}

/// Converts a continuous draw to whole units: round half away from zero, clamp at 0.
fn to_units(value: f64) -> u32 {
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}

/// `max(0, round(Normal(mean, sigma)))`, drawn independently per retailer.
#[derive(Debug, Clone)]
pub struct IndependentNormalDemand {
    normal: Normal<f64>,
}

impl IndependentNormalDemand {
    pub fn new(mean: f64, sigma: f64) -> Result<Self, SimError> {
        let normal = Normal::new(mean, sigma)
            .map_err(|e| SimError::config("demand_sigma", e.to_string()))?;
        Ok(Self { normal })
    }

    /// A single retailer's demand for one day.
    pub fn draw(&self, rng: &mut SimRng) -> u32 {
        to_units(self.normal.sample(rng))
    }
}

impl DemandGenerator for IndependentNormalDemand {
    fn realize_day(&mut self, _day: u32, rng: &mut SimRng, demand: &mut [u32]) {
        for slot in demand.iter_mut() {
            *slot = self.draw(rng);
        }
    }
}

/// Equicorrelated normal demand built from one shared factor per day:
/// `mean + sigma * (sqrt(rho) * Z0 + sqrt(1 - rho) * Zi)`.
///
/// Each retailer keeps the `Normal(mean, sigma)` marginal while any two
/// retailers are correlated by `rho`.
#[derive(Debug, Clone)]
pub struct CommonFactorDemand {
    mean: f64,
    sigma: f64,
    shared: f64,
    idiosyncratic: f64,
}

impl CommonFactorDemand {
    pub fn new(mean: f64, sigma: f64, rho: f64) -> Result<Self, SimError> {
        if !(0.0..=1.0).contains(&rho) {
            return Err(SimError::config(
                "demand_rho",
                format!("common-factor draws need rho in [0, 1], got {rho}"),
            ));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SimError::config("demand_sigma", format!("{sigma} must be >= 0")));
        }
        Ok(Self {
            mean,
            sigma,
            shared: rho.sqrt(),
            idiosyncratic: (1.0 - rho).sqrt(),
        })
    }
}

impl DemandGenerator for CommonFactorDemand {
    fn realize_day(&mut self, _day: u32, rng: &mut SimRng, demand: &mut [u32]) {
        let common: f64 = StandardNormal.sample(rng);
        for slot in demand.iter_mut() {
            let own: f64 = StandardNormal.sample(rng);
            let z = self.shared * common + self.idiosyncratic * own;
            *slot = to_units(self.mean + self.sigma * z);
        }
    }
}

/// Builds the generator selected by `config.realized_demand`.
pub fn demand_generator(config: &ScenarioConfig) -> Result<Box<dyn DemandGenerator>, SimError> {
    let generator: Box<dyn DemandGenerator> = match config.realized_demand {
        DemandDraws::Independent => Box::new(IndependentNormalDemand::new(
            config.demand_mean,
            config.demand_sigma,
        )?),
        DemandDraws::CommonFactor => Box::new(CommonFactorDemand::new(
            config.demand_mean,
            config.demand_sigma,
            config.demand_rho,
        )?),
    };
    Ok(generator)
}
