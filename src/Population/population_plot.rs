//! Two views of the same series: linear population axis on the left,
//! logarithmic on the right.

use super::population_data::PopulationData;
use crate::Utils::grid::padded;
use crate::Utils::output_format::OutputFormat;
use crate::error::{DemoError, plot_err};
use crate::settings::PopulationConfig;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Renders the population plot into a png/bmp/jpg or svg file.
pub fn plot_population<P: AsRef<Path>>(
    data: &PopulationData,
    config: &PopulationConfig,
    path: P,
) -> Result<(), DemoError> {
    let path = path.as_ref();
    // the format is checked before the data so that a wrong extension is reported first
    let format = OutputFormat::still_image(path)?;
    check_data(data)?;
    let size = (config.width, config.height);
    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_population(&root, data, config)?;
        }
        _ => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_population(&root, data, config)?;
        }
    }
    info!("population plot written to '{}'", path.display());
    Ok(())
}

fn check_data(data: &PopulationData) -> Result<(), DemoError> {
    if data.is_empty() {
        return Err(DemoError::MissingData("population series is empty".to_string()));
    }
    if let Some(bad) = data.population.iter().find(|p| !(**p > 0.0) || !p.is_finite()) {
        return Err(DemoError::InvalidParameter(format!(
            "population values must be positive for the logarithmic axis, got {}",
            bad
        )));
    }
    Ok(())
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (lo, hi)
}

fn draw_population<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &PopulationData,
    config: &PopulationConfig,
) -> Result<(), DemoError> {
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((1, 2));

    let (year_lo, year_hi) = value_range(&data.years);
    let (x_lo, x_hi) = padded(year_lo, year_hi, 0.0);
    let (pop_lo, pop_hi) = value_range(&data.population);

    let (y_lo, y_hi) = padded(pop_lo, pop_hi, 0.05);
    let mut linear = ChartBuilder::on(&panels[0])
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(plot_err)?;
    linear
        .configure_mesh()
        .x_desc(config.year_column.as_str())
        .y_desc(config.population_column.as_str())
        .y_label_formatter(&|y| format!("{:.2e}", y))
        .draw()
        .map_err(plot_err)?;
    linear
        .draw_series(LineSeries::new(data.points(), &BLUE))
        .map_err(plot_err)?;

    // multiplicative padding keeps the lower bound positive
    let (log_lo, log_hi) = if pop_hi > pop_lo {
        (pop_lo / 1.05, pop_hi * 1.05)
    } else {
        (pop_lo / 2.0, pop_hi * 2.0)
    };
    let mut logarithmic = ChartBuilder::on(&panels[1])
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, (log_lo..log_hi).log_scale())
        .map_err(plot_err)?;
    logarithmic
        .configure_mesh()
        .x_desc(config.year_column.as_str())
        .y_desc(config.population_column.as_str())
        .y_label_formatter(&|y| format!("{:.2e}", y))
        .draw()
        .map_err(plot_err)?;
    logarithmic
        .draw_series(LineSeries::new(data.points(), &BLUE))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
