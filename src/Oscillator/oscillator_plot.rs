//! Rendering and export of the harmonic oscillator solutions.
//!
//! One figure, one panel per case stacked from top to bottom, the amplitude
//! drawn against time.

use super::harmonic_oscillator_IVP::{HarmonicOscillatorIVP, Trajectory};
use crate::Utils::grid::{finite_bounds, padded};
use crate::Utils::output_format::OutputFormat;
use crate::Utils::save_results::write_columns_csv;
use crate::error::{DemoError, plot_err};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub const FIGURE_TITLE: &str = "Some Examples of the Harmonic Oscillator";

const CURVE_COLORS: [RGBColor; 3] = [BLUE, RED, GREEN];

impl HarmonicOscillatorIVP {
    /// Draws x(t) of every case into a png/bmp/jpg or svg file.
    pub fn plot<P: AsRef<Path>>(&self, path: P) -> Result<(), DemoError> {
        self.ensure_solved()?;
        let path = path.as_ref();
        let size = (self.config().width, self.config().height);
        match OutputFormat::still_image(path)? {
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
            }
            _ => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
            }
        }
        info!("oscillator plot written to '{}'", path.display());
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), DemoError> {
        let (t, solutions) = self.get_result();
        root.fill(&WHITE).map_err(plot_err)?;
        let body = root
            .titled(FIGURE_TITLE, ("sans-serif", 20))
            .map_err(plot_err)?;
        let panels = body.split_evenly((solutions.len(), 1));
        let t_range = (t[0], t[t.len() - 1]);
        for (i, (panel, trajectory)) in panels.iter().zip(solutions).enumerate() {
            draw_case(panel, t, t_range, trajectory, &CURVE_COLORS[i % CURVE_COLORS.len()])?;
        }
        root.present().map_err(plot_err)?;
        Ok(())
    }

    /// Writes the grid and every trajectory to CSV: `t, x_1, v_1, x_2, v_2, ...`.
    pub fn save_result<P: AsRef<Path>>(&self, path: P) -> Result<(), DemoError> {
        self.ensure_solved()?;
        let (t, solutions) = self.get_result();
        let mut header = vec!["t".to_string()];
        let mut cols = vec![t.to_vec()];
        for (i, trajectory) in solutions.iter().enumerate() {
            header.push(format!("x_{}", i + 1));
            header.push(format!("v_{}", i + 1));
            cols.push(trajectory.x.clone());
            cols.push(trajectory.v.clone());
        }
        write_columns_csv(path.as_ref(), &header, &cols)
    }
}

fn draw_case<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    t: &[f64],
    (t_min, t_max): (f64, f64),
    trajectory: &Trajectory,
    color: &RGBColor,
) -> Result<(), DemoError> {
    let (lo, hi) = finite_bounds(&trajectory.x).unwrap_or((-1.0, 1.0));
    let (lo, hi) = padded(lo, hi, 0.05);
    let mut chart = ChartBuilder::on(panel)
        .caption(trajectory.case.title(), ("sans-serif", 16))
        .margin(8)
        .x_label_area_size(25)
        .y_label_area_size(40)
        .build_cartesian_2d(t_min..t_max, lo..hi)
        .map_err(plot_err)?;
    chart.configure_mesh().draw().map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(
            t.iter().copied().zip(trajectory.x.iter().copied()),
            color,
        ))
        .map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OscillatorConfig;
    use tempfile::tempdir;

    fn solved() -> HarmonicOscillatorIVP {
        let mut config = OscillatorConfig::default();
        config.timesteps = 100;
        let mut ivp = HarmonicOscillatorIVP::new(config).unwrap();
        ivp.solve().unwrap();
        ivp
    }

    #[test]
    fn test_plot_requires_solution() {
        let dir = tempdir().unwrap();
        let ivp = HarmonicOscillatorIVP::new(OscillatorConfig::default()).unwrap();
        assert!(ivp.plot(dir.path().join("a.png")).is_err());
        assert!(ivp.save_result(dir.path().join("a.csv")).is_err());
    }

    #[test]
    fn test_plot_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let ivp = solved();
        let result = ivp.plot(dir.path().join("a.pdf"));
        assert!(matches!(result, Err(DemoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oscillator.csv");
        let ivp = solved();
        ivp.save_result(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "t,x_1,v_1,x_2,v_2,x_3,v_3");
        assert_eq!(content.lines().count(), 101);
    }

    #[test]
    fn test_plot_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oscillator.svg");
        let ivp = solved();
        match ivp.plot(&path) {
            Ok(()) => assert!(path.is_file()),
            // text rendering needs a system font, which minimal containers lack
            Err(DemoError::Plot(msg)) => eprintln!("skipped: {}", msg),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
