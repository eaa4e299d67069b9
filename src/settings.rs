//! # Settings Module
//!
//! ## Purpose
//! Holds the parameters of every demonstration in one serialisable structure.
//! The defaults reproduce the classic lecture examples, so running any
//! demonstration without a configuration file gives the familiar pictures.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "oscillator": { "x0": 10.0, "v0": 0.0, "t_max": 5.0, "timesteps": 1000, ... },
//!   "population": { "year_column": "year", "population_column": "world population", ... },
//!   "funnel": { "outlet_area": 0.0001, "alpha": 0.6, "fps": 20, ... }
//! }
//! ```
//! Every field is optional; anything left out keeps its default value.
//!
//! ## Usage Pattern
//! ```rust,ignore
//! use physdemos::settings::DemoConfig;
//!
//! let config = DemoConfig::load("physdemos.json")?;
//! config.pretty_print();
//! ```

use crate::Funnel::funnel_shapes::FunnelShape;
use crate::Oscillator::harmonic_oscillator_IVP::OscillatorCase;
use crate::error::DemoError;
use log::info;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Default name of the configuration file looked up by the command line tool.
pub const DEFAULT_CONFIG_FILE: &str = "physdemos.json";

/// Parameters of the harmonic oscillator demonstration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    /// initial amplitude
    pub x0: f64,
    /// initial speed
    pub v0: f64,
    pub t0: f64,
    pub t_max: f64,
    /// number of equally spaced output points, both ends included
    pub timesteps: usize,
    pub cases: Vec<OscillatorCase>,
    /// relative and absolute tolerances of the BDF solver
    pub rtol: f64,
    pub atol: f64,
    /// largest step the solver may take; `None` means one output interval
    pub max_step: Option<f64>,
    pub width: u32,
    pub height: u32,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            x0: 10.0,
            v0: 0.0,
            t0: 0.0,
            t_max: 5.0,
            timesteps: 1000,
            cases: vec![
                OscillatorCase::new(1.0, 1.0, None),
                OscillatorCase::new(1.0, 5.0, Some("heavy")),
                OscillatorCase::new(5.0, 1.0, Some("strong")),
            ],
            rtol: 1e-8,
            atol: 1e-10,
            max_step: None,
            width: 500,
            height: 1000,
        }
    }
}

/// Parameters of the population plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub year_column: String,
    pub population_column: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            year_column: "year".to_string(),
            population_column: "world population".to_string(),
            width: 1200,
            height: 500,
        }
    }
}

/// Physical and rendering parameters of the funnel drainage animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    /// cross-section of the outlet pipe
    pub outlet_area: f64,
    /// height of every funnel
    pub height: f64,
    /// reference volume the normalised shapes are scaled to
    pub volume: f64,
    /// discharge coefficient, 0 < alpha <= sqrt(2)
    pub alpha: f64,
    pub gravity: f64,
    pub fps: u32,
    /// number of points along the funnel wall
    pub resolution: usize,
    /// upper bound on the length of a height trajectory
    pub max_frames: usize,
    pub shapes: Vec<FunnelShape>,
    pub width: u32,
    pub height_px: u32,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            outlet_area: 0.0001,
            height: 1.0,
            volume: 2.0 / 3.0 * PI,
            alpha: 0.6,
            gravity: 9.81,
            fps: 20,
            resolution: 1000,
            max_frames: 100_000,
            shapes: vec![
                FunnelShape::Cone,
                FunnelShape::HalfSphere,
                FunnelShape::Cylinder,
                FunnelShape::SphereNormalised,
            ],
            width: 1600,
            height_px: 900,
        }
    }
}

impl FunnelConfig {
    /// Integration step per animation frame. The recurrence advances by the
    /// frame interval expressed in milliseconds.
    pub fn dt(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Radius of the outlet pipe.
    pub fn outlet_radius(&self) -> f64 {
        (self.outlet_area / PI).sqrt()
    }
}

/// Configuration of all demonstrations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub oscillator: OscillatorConfig,
    pub population: PopulationConfig,
    pub funnel: FunnelConfig,
}

impl DemoConfig {
    /// Loads configuration from a JSON file. A missing file is not an error:
    /// the defaults are returned instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DemoError> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: DemoConfig = serde_json::from_str(&content)?;
            info!("loaded configuration from '{}'", path.display());
            Ok(config)
        } else {
            info!(
                "configuration file '{}' not found, using defaults",
                path.display()
            );
            Ok(DemoConfig::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DemoError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!("configuration written to '{}'", path.as_ref().display());
        Ok(())
    }

    /// Prints the active configuration as tables.
    pub fn pretty_print(&self) {
        let osc = &self.oscillator;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["x0", format!("{}", osc.x0)]);
        table.add_row(row!["v0", format!("{}", osc.v0)]);
        table.add_row(row!["t", format!("{} .. {}", osc.t0, osc.t_max)]);
        table.add_row(row!["timesteps", format!("{}", osc.timesteps)]);
        for case in &osc.cases {
            table.add_row(row!["case", case.title()]);
        }
        table.add_row(row!["rtol / atol", format!("{:e} / {:e}", osc.rtol, osc.atol)]);
        println!("\nHarmonic oscillator:");
        table.printstd();

        let pop = &self.population;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["year column", pop.year_column]);
        table.add_row(row!["population column", pop.population_column]);
        table.add_row(row!["figure", format!("{}x{}", pop.width, pop.height)]);
        println!("\nPopulation plot:");
        table.printstd();

        let fun = &self.funnel;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["outlet area (s)", format!("{:.2e}", fun.outlet_area), "m^2"]);
        table.add_row(row!["height (H)", format!("{}", fun.height), "m"]);
        table.add_row(row!["volume", format!("{:.4}", fun.volume), "m^3"]);
        table.add_row(row!["alpha", format!("{}", fun.alpha), "-"]);
        table.add_row(row!["g", format!("{}", fun.gravity), "m/s^2"]);
        table.add_row(row!["fps", format!("{}", fun.fps), "1/s"]);
        table.add_row(row!["resolution", format!("{}", fun.resolution), "-"]);
        let shapes = fun
            .shapes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(row!["shapes", shapes, ""]);
        println!("\nFunnel drainage:");
        table.printstd();
    }
}
