//! # Funnel animation
//!
//! All funnels drain side by side in a grid of panels (two columns). Each panel
//! shows the fluid as a filled polygon, the funnel wall as a red outline, the
//! outlet pipe below the funnel and a timer. The animation is written as an
//! animated GIF; alternatively every frame can be dumped as a PNG picture for
//! an external video encoder.

use super::funnel_drainage::{Funnel, check_config, frame_count};
use crate::Utils::output_format::OutputFormat;
use crate::error::{DemoError, plot_err};
use crate::settings::FunnelConfig;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// fluid colour
const FLUID: RGBColor = RGBColor(31, 119, 180);
const Y_RANGE: (f64, f64) = (-0.5, 1.5);
const X_HALF_WIDTH: f64 = 2.0;
const PIPE_DEPTH: f64 = 0.3;
const TIMER_POSITION: (f64, f64) = (0.0, 1.25);

pub struct FunnelAnimation {
    config: FunnelConfig,
    funnels: Vec<Funnel>,
    frames: usize,
}

impl FunnelAnimation {
    /// Builds one funnel per configured shape.
    pub fn new(config: FunnelConfig) -> Result<Self, DemoError> {
        check_config(&config)?;
        if config.shapes.is_empty() {
            return Err(DemoError::InvalidParameter(
                "no funnel shapes given".to_string(),
            ));
        }
        let funnels = config
            .shapes
            .iter()
            .map(|shape| Funnel::new(*shape, &config))
            .collect::<Result<Vec<_>, _>>()?;
        let frames = frame_count(&funnels);
        info!(
            "{} funnels, {} frames at {} fps",
            funnels.len(),
            frames,
            config.fps
        );
        Ok(Self {
            config,
            funnels,
            frames,
        })
    }

    pub fn funnels(&self) -> &[Funnel] {
        &self.funnels
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Rows and columns of the panel grid.
    pub fn grid(&self) -> (usize, usize) {
        let n = self.funnels.len();
        let cols = if n > 1 { 2 } else { 1 };
        (n.div_ceil(cols), cols)
    }

    /// Writes the animation as an animated GIF.
    pub fn render<P: AsRef<Path>>(&self, path: P) -> Result<(), DemoError> {
        let path = path.as_ref();
        if OutputFormat::from_path(path)? != OutputFormat::Gif {
            return Err(DemoError::UnsupportedFormat(format!(
                "{} (the animation is written as .gif)",
                path.display()
            )));
        }
        let delay = (1000 / self.config.fps).max(1);
        let size = (self.config.width, self.config.height_px);
        let root = BitMapBackend::gif(path, size, delay)
            .map_err(plot_err)?
            .into_drawing_area();
        for i in 0..self.frames {
            self.draw_frame(&root, i)?;
            if i % 100 == 0 {
                debug!("frame {}/{}", i, self.frames);
            }
        }
        info!("animation with {} frames written to '{}'", self.frames, path.display());
        Ok(())
    }

    /// Writes every frame as `frame_00000.png`, `frame_00001.png`, ... into `dir`.
    pub fn dump_frames<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, DemoError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let size = (self.config.width, self.config.height_px);
        let mut written = Vec::with_capacity(self.frames);
        for i in 0..self.frames {
            let file = dir.join(format!("frame_{:05}.png", i));
            {
                let root = BitMapBackend::new(&file, size).into_drawing_area();
                self.draw_frame(&root, i)?;
            }
            written.push(file);
        }
        info!("{} frames written to '{}'", written.len(), dir.display());
        Ok(written)
    }

    fn draw_frame<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        i: usize,
    ) -> Result<(), DemoError> {
        root.fill(&WHITE).map_err(plot_err)?;
        let panels = root.split_evenly(self.grid());
        for (panel, funnel) in panels.iter().zip(&self.funnels) {
            self.draw_funnel(panel, funnel, i)?;
        }
        root.present().map_err(plot_err)?;
        Ok(())
    }

    fn draw_funnel<DB: DrawingBackend>(
        &self,
        panel: &DrawingArea<DB, Shift>,
        funnel: &Funnel,
        i: usize,
    ) -> Result<(), DemoError> {
        // equal scaling on both axes: widen the x range to the panel's aspect ratio
        let (w, h) = panel.dim_in_pixel();
        let y_span = Y_RANGE.1 - Y_RANGE.0;
        let half_width = if h > 0 {
            X_HALF_WIDTH.max(0.5 * y_span * w as f64 / h as f64)
        } else {
            X_HALF_WIDTH
        };
        let mut chart = ChartBuilder::on(panel)
            .caption(funnel.shape().to_string(), ("sans-serif", 16))
            .margin(5)
            .build_cartesian_2d(-half_width..half_width, Y_RANGE.0..Y_RANGE.1)
            .map_err(plot_err)?;

        let frame = funnel.frame(i);
        chart
            .draw_series(std::iter::once(Polygon::new(
                funnel.cross_section(frame.height),
                FLUID.filled(),
            )))
            .map_err(plot_err)?;

        let mut outline = funnel.outline();
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        chart
            .draw_series(std::iter::once(PathElement::new(outline, RED.stroke_width(1))))
            .map_err(plot_err)?;

        let r = self.config.outlet_radius();
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(-r, -PIPE_DEPTH), (r, 0.0)],
                FLUID.filled(),
            )))
            .map_err(plot_err)?;

        chart
            .draw_series(std::iter::once(Text::new(
                frame.label,
                TIMER_POSITION,
                ("sans-serif", 18).into_font(),
            )))
            .map_err(plot_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Funnel::funnel_shapes::FunnelShape;
    use tempfile::tempdir;

    fn small_config(shapes: Vec<FunnelShape>) -> FunnelConfig {
        FunnelConfig {
            fps: 1,
            resolution: 20,
            shapes,
            width: 160,
            height_px: 90,
            ..FunnelConfig::default()
        }
    }

    #[test]
    fn test_grid_layout() {
        let one = FunnelAnimation::new(small_config(vec![FunnelShape::Cylinder])).unwrap();
        assert_eq!(one.grid(), (1, 1));
        let four = FunnelAnimation::new(FunnelConfig {
            resolution: 20,
            ..FunnelConfig::default()
        })
        .unwrap();
        assert_eq!(four.grid(), (2, 2));
        let three = FunnelAnimation::new(small_config(vec![
            FunnelShape::Cone,
            FunnelShape::Cylinder,
            FunnelShape::HalfSphere,
        ]))
        .unwrap();
        assert_eq!(three.grid(), (2, 2));
    }

    #[test]
    fn test_frame_count_is_longest_funnel() {
        let anim = FunnelAnimation::new(small_config(vec![
            FunnelShape::Cone,
            FunnelShape::Cylinder,
        ]))
        .unwrap();
        let longest = anim.funnels().iter().map(|f| f.heights().len()).max().unwrap();
        assert_eq!(anim.frame_count(), longest);
    }

    #[test]
    fn test_no_shapes() {
        assert!(FunnelAnimation::new(small_config(vec![])).is_err());
    }

    #[test]
    fn test_render_requires_gif() {
        let dir = tempdir().unwrap();
        let anim = FunnelAnimation::new(small_config(vec![FunnelShape::Cylinder])).unwrap();
        let result = anim.render(dir.path().join("movie.mp4"));
        assert!(matches!(result, Err(DemoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_dump_frames() {
        let dir = tempdir().unwrap();
        let frames_dir = dir.path().join("frames");
        let config = FunnelConfig {
            max_frames: 3,
            ..small_config(vec![FunnelShape::Cone, FunnelShape::Cylinder])
        };
        let anim = FunnelAnimation::new(config).unwrap();
        assert_eq!(anim.frame_count(), 3);
        match anim.dump_frames(&frames_dir) {
            Ok(written) => {
                assert_eq!(written.len(), anim.frame_count());
                for (i, file) in written.iter().enumerate() {
                    assert_eq!(file, &frames_dir.join(format!("frame_{:05}.png", i)));
                    assert!(file.is_file());
                }
                assert_eq!(
                    written[2].file_name().unwrap().to_str().unwrap(),
                    "frame_00002.png"
                );
            }
            // text rendering needs a system font, which minimal containers lack
            Err(DemoError::Plot(msg)) => eprintln!("skipped: {}", msg),
            Err(e) => panic!("unexpected error: {}", e),
        }
        assert!(frames_dir.is_dir());
    }

    #[test]
    fn test_render_gif() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movie.gif");
        let anim = FunnelAnimation::new(small_config(vec![FunnelShape::Cylinder])).unwrap();
        match anim.render(&path) {
            Ok(()) => assert!(path.is_file()),
            // text rendering needs a system font, which minimal containers lack
            Err(DemoError::Plot(msg)) => eprintln!("skipped: {}", msg),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
