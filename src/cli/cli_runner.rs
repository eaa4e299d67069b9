//! The three demonstrations as complete pipelines, shared by the command line
//! and the interactive menu.

use crate::Funnel::funnel_animation::FunnelAnimation;
use crate::Oscillator::harmonic_oscillator_IVP::HarmonicOscillatorIVP;
use crate::Population::population_data::load_population;
use crate::Population::population_plot::plot_population;
use crate::Utils::show_this_pic::show_image;
use crate::error::DemoError;
use crate::settings::{FunnelConfig, OscillatorConfig, PopulationConfig};
use log::{info, warn};
use std::path::Path;

fn show(path: &Path) {
    if let Err(e) = show_image(path) {
        warn!("cannot open '{}': {}", path.display(), e);
    }
}

pub fn run_oscillator(
    config: &OscillatorConfig,
    output: &Path,
    csv: Option<&Path>,
    open: bool,
) -> Result<(), DemoError> {
    let mut ivp = HarmonicOscillatorIVP::new(config.clone())?;
    info!("solving {} oscillator cases", config.cases.len());
    ivp.solve()?;
    ivp.plot(output)?;
    if let Some(csv) = csv {
        ivp.save_result(csv)?;
    }
    if open {
        show(output);
    }
    Ok(())
}

pub fn run_population(
    config: &PopulationConfig,
    input: &Path,
    output: &Path,
    open: bool,
) -> Result<(), DemoError> {
    let data = load_population(input, config)?;
    plot_population(&data, config, output)?;
    if open {
        show(output);
    }
    Ok(())
}

pub fn run_funnel(
    config: &FunnelConfig,
    movie: &Path,
    frames_dir: Option<&Path>,
    open: bool,
) -> Result<(), DemoError> {
    let animation = FunnelAnimation::new(config.clone())?;
    animation.render(movie)?;
    if let Some(dir) = frames_dir {
        animation.dump_frames(dir)?;
    }
    if open {
        show(movie);
    }
    Ok(())
}
