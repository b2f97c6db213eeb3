use std::path::Path;

use crate::{
    buffer::Buffer,
    entities::{
        project::{Project, ProjectId},
        unit::{EquipmentUnit, UnitId},
    },
    simulation::Simulation,
    stats::Summary,
    variates::Variates,
};

/// Simulation parameters. The builder and `Default` both carry the reference
/// parameterization; a JSON file may override any subset of fields.
#[derive(Debug, Clone, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of request sources. Priorities equal ids, ascending from 1.
    #[builder(default = 10)]
    pub nr_projects: usize,
    /// Number of equipment units in the pool.
    #[builder(default = 12)]
    pub nr_units: usize,
    /// Staging buffer capacity in slots.
    #[builder(default = 10)]
    pub buffer_capacity: usize,
    /// Total number of arrivals to generate before draining.
    #[builder(default = 2500)]
    pub arrival_budget: usize,
    /// Rate of the exponential inter-arrival distribution.
    #[builder(default = 2.0)]
    pub arrival_rate: f64,
    /// Lower bound of the uniform service-duration range.
    #[builder(default = 6.0)]
    pub service_min: f64,
    /// Upper bound of the uniform service-duration range.
    #[builder(default = 8.0)]
    pub service_max: f64,
    /// Fixed generator seed; unseeded runs draw entropy.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    fn validate(&self) -> Result<(), Error> {
        if self.nr_projects == 0 {
            return Err(Error::Parameter("nr_projects must be at least 1"));
        }
        if self.nr_units == 0 {
            return Err(Error::Parameter("nr_units must be at least 1"));
        }
        if self.buffer_capacity == 0 {
            return Err(Error::Parameter("buffer_capacity must be at least 1"));
        }
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(Error::Parameter("arrival_rate must be positive"));
        }
        if !self.service_min.is_finite() || !self.service_max.is_finite() {
            return Err(Error::Parameter("service range must be finite"));
        }
        if self.service_min <= 0.0 || self.service_max < self.service_min {
            return Err(Error::Parameter(
                "service range must satisfy 0 < service_min <= service_max",
            ));
        }
        Ok(())
    }
}

/// Runs one complete simulation and aggregates its statistics.
pub fn run(cfg: Config) -> Result<Summary, Error> {
    cfg.validate()?;
    let mut variates = Variates::new(cfg.arrival_rate, cfg.service_min, cfg.service_max, cfg.seed);
    let projects = (1..=cfg.nr_projects)
        .map(|i| Project::new(ProjectId::new(i)))
        .collect::<Vec<_>>();
    let units = (1..=cfg.nr_units)
        .map(|i| {
            EquipmentUnit::builder()
                .id(UnitId::new(i))
                .kind(variates.kind())
                .build()
        })
        .collect::<Vec<_>>();
    let sim = Simulation::builder()
        .variates(variates)
        .projects(projects)
        .units(units)
        .buffer(Buffer::new(cfg.buffer_capacity))
        .budget(cfg.arrival_budget)
        .build();
    let outcome = sim.run();
    Ok(Summary::compute(
        outcome.log.records(),
        &outcome.units,
        outcome.elapsed,
        cfg.nr_projects,
    ))
}

pub fn read_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serde error")]
    Serde(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("invalid parameter: {0}")]
    Parameter(&'static str),
}
