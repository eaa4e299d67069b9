//! # Funnel drainage
//!
//! Torricelli outflow through an outlet of cross-section `s`:
//!
//! ```text
//! v(h)  = alpha * sqrt(g*h)          outflow velocity at fill height h
//! A(h)  = pi * r(h)^2                free surface of the fluid
//! dh(h) = -s * v(h) / A(h) * dt      change of the fill height per frame
//! ```
//!
//! The fill height is advanced with the explicit step `h <- h + dh(h)`, starting
//! at the rim, until the next value is no longer positive. Every step is one
//! animation frame.

use super::funnel_shapes::{FunnelShape, RadiusProfile};
use crate::Utils::grid::linspace;
use crate::error::DemoError;
use crate::settings::FunnelConfig;
use log::{debug, warn};
use std::f64::consts::PI;

/// Checks the physical and rendering parameters of the funnel demonstration.
pub fn check_config(config: &FunnelConfig) -> Result<(), DemoError> {
    let positive = [
        ("outlet_area", config.outlet_area),
        ("height", config.height),
        ("volume", config.volume),
        ("alpha", config.alpha),
        ("gravity", config.gravity),
    ];
    for (name, value) in positive {
        if !(value > 0.0) || !value.is_finite() {
            return Err(DemoError::InvalidParameter(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }
    if config.fps == 0 {
        return Err(DemoError::InvalidParameter("fps must be positive".to_string()));
    }
    if config.resolution < 2 {
        return Err(DemoError::InvalidParameter(
            "resolution must be at least 2".to_string(),
        ));
    }
    if config.max_frames == 0 {
        return Err(DemoError::InvalidParameter(
            "max_frames must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Outflow law of the funnel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainageModel {
    pub outlet_area: f64,
    pub alpha: f64,
    pub gravity: f64,
    /// step per frame
    pub dt: f64,
}

impl DrainageModel {
    pub fn from_config(config: &FunnelConfig) -> Self {
        Self {
            outlet_area: config.outlet_area,
            alpha: config.alpha,
            gravity: config.gravity,
            dt: config.dt(),
        }
    }

    /// velocity of drainage when fluid of height h is left
    pub fn velocity(&self, h: f64) -> f64 {
        self.alpha * (self.gravity * h).sqrt()
    }

    /// area of the fluid surface at height h
    pub fn area(&self, h: f64, profile: &RadiusProfile) -> f64 {
        PI * profile.radius(h).powi(2)
    }

    /// change of the fill height during one frame
    pub fn dh(&self, h: f64, profile: &RadiusProfile) -> f64 {
        -self.outlet_area * self.velocity(h) / self.area(h, profile) * self.dt
    }
}

/// What one funnel shows in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelFrame {
    pub height: f64,
    pub label: String,
}

pub struct Funnel {
    profile: RadiusProfile,
    model: DrainageModel,
    h_max: f64,
    h_min: f64,
    res: usize,
    heights: Vec<f64>,
}

impl Funnel {
    /// Funnel filled to the rim; the height trajectory is computed right away.
    pub fn new(shape: FunnelShape, config: &FunnelConfig) -> Result<Self, DemoError> {
        Self::with_bounds(shape, config, 0.0, config.height)
    }

    pub fn with_bounds(
        shape: FunnelShape,
        config: &FunnelConfig,
        h_min: f64,
        h_max: f64,
    ) -> Result<Self, DemoError> {
        check_config(config)?;
        if !(h_min < h_max) {
            return Err(DemoError::InvalidParameter(format!(
                "h_min ({}) must be below h_max ({})",
                h_min, h_max
            )));
        }
        let profile = RadiusProfile::with_bounds(shape, config, h_min, h_max)?;
        let mut funnel = Self {
            profile,
            model: DrainageModel::from_config(config),
            h_max,
            h_min,
            res: config.resolution,
            heights: Vec::new(),
        };
        funnel.calc_height(config.max_frames);
        debug!(
            "{} funnel: {} frames, last height {:.3e}",
            shape,
            funnel.heights.len(),
            funnel.heights.last().copied().unwrap_or(0.0)
        );
        Ok(funnel)
    }

    fn calc_height(&mut self, max_frames: usize) {
        let mut heights = vec![self.h_max];
        let mut last = self.h_max;
        loop {
            let next = last + self.model.dh(last, &self.profile);
            if !(next > 0.0) || !next.is_finite() {
                break;
            }
            if heights.len() >= max_frames {
                warn!(
                    "{} funnel: stopped after {} frames at height {:.3e}",
                    self.profile.shape, max_frames, last
                );
                break;
            }
            heights.push(next);
            last = next;
        }
        self.heights = heights;
    }

    pub fn shape(&self) -> FunnelShape {
        self.profile.shape
    }

    pub fn profile(&self) -> &RadiusProfile {
        &self.profile
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Polygon of the region between the axis mirror images of the wall,
    /// from the bottom up to height `h`.
    pub fn cross_section(&self, h: f64) -> Vec<(f64, f64)> {
        let y = linspace(self.h_min, h, self.res);
        let x: Vec<f64> = y.iter().map(|yel| self.profile.radius(*yel)).collect();
        let mut vertices: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        vertices.extend(x.iter().rev().zip(y.iter().rev()).map(|(x, y)| (-x, *y)));
        vertices
    }

    /// Outline of the whole funnel.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        self.cross_section(self.h_max)
    }

    /// Fill height and timer text of frame `i`. After the funnel ran dry the
    /// last height is kept and the timer stops at the drain time.
    pub fn frame(&self, i: usize) -> FunnelFrame {
        let idx = i.min(self.heights.len() - 1);
        let t = idx as f64 * self.model.dt / 1000.0;
        FunnelFrame {
            height: self.heights[idx],
            label: format!("t = {:5.2} s", t),
        }
    }
}

/// Number of frames needed to show every funnel until it runs dry.
pub fn frame_count(funnels: &[Funnel]) -> usize {
    funnels.iter().map(|f| f.heights.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_and_step() {
        let config = FunnelConfig::default();
        let model = DrainageModel::from_config(&config);
        assert_relative_eq!(model.velocity(1.0), 0.6 * 9.81f64.sqrt());
        assert_eq!(model.velocity(0.0), 0.0);

        let profile = RadiusProfile::new(FunnelShape::Cylinder, &config).unwrap();
        // the cylinder's surface is V/H
        assert_relative_eq!(model.area(0.3, &profile), config.volume, max_relative = 1e-12);
        let expected = -1e-4 * 0.6 * 9.81f64.sqrt() / config.volume * 50.0;
        assert_relative_eq!(model.dh(1.0, &profile), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_height_trajectory() {
        let config = FunnelConfig::default();
        let funnel = Funnel::new(FunnelShape::Cylinder, &config).unwrap();
        let heights = funnel.heights();
        assert_eq!(heights[0], 1.0);
        assert!(heights.len() > 100);
        assert!(heights.windows(2).all(|w| w[1] < w[0]));
        assert!(heights.iter().all(|h| *h > 0.0));
        // the step after the last stored height empties the funnel
        let last = *heights.last().unwrap();
        let model = DrainageModel::from_config(&config);
        assert!(last + model.dh(last, funnel.profile()) <= 0.0);
    }

    #[test]
    fn test_cylinder_drain_time() {
        // h' = -c*sqrt(h) drains in 2*sqrt(h0)/c steps
        let config = FunnelConfig::default();
        let funnel = Funnel::new(FunnelShape::Cylinder, &config).unwrap();
        let c = 1e-4 * 0.6 * 9.81f64.sqrt() / config.volume * 50.0;
        let expected = 2.0 / c;
        let frames = funnel.heights().len() as f64;
        assert!((frames - expected).abs() / expected < 0.05, "{} vs {}", frames, expected);
    }

    #[test]
    fn test_max_frames_cap() {
        let config = FunnelConfig {
            max_frames: 10,
            ..FunnelConfig::default()
        };
        let funnel = Funnel::new(FunnelShape::Cylinder, &config).unwrap();
        assert_eq!(funnel.heights().len(), 10);
    }

    #[test]
    fn test_cross_section() {
        let config = FunnelConfig {
            resolution: 5,
            ..FunnelConfig::default()
        };
        let funnel = Funnel::new(FunnelShape::HalfSphere, &config).unwrap();
        let poly = funnel.cross_section(0.5);
        assert_eq!(poly.len(), 10);
        assert_eq!(poly[0].1, 0.0);
        assert_eq!(poly[4].1, 0.5);
        assert_eq!(poly[5], (-poly[4].0, 0.5));
        assert_eq!(poly[9], (-poly[0].0, 0.0));
        assert_relative_eq!(poly[4].0, 0.75f64.sqrt());
        assert_eq!(funnel.outline()[4].1, 1.0);
    }

    #[test]
    fn test_frames() {
        let config = FunnelConfig::default();
        let funnel = Funnel::new(FunnelShape::Cone, &config).unwrap();
        let f0 = funnel.frame(0);
        assert_eq!(f0.height, 1.0);
        assert_eq!(f0.label, "t =  0.00 s");
        assert_eq!(funnel.frame(3).label, "t =  0.15 s");
        let n = funnel.heights().len();
        let past_end = funnel.frame(n + 50);
        assert_eq!(past_end.height, funnel.heights()[n - 1]);
    }

    #[test]
    fn test_timer_stops_when_empty() {
        let config = FunnelConfig::default();
        let cone = Funnel::new(FunnelShape::Cone, &config).unwrap();
        let cylinder = Funnel::new(FunnelShape::Cylinder, &config).unwrap();
        let n = cone.heights().len();
        assert!(n < cylinder.heights().len());
        let last = cone.frame(n - 1).label;
        assert_eq!(cone.frame(n).label, last);
        assert_eq!(cone.frame(n + 50).label, last);
        // the slower funnel still counts
        assert_ne!(cylinder.frame(n + 50).label, cylinder.frame(n - 1).label);
    }

    #[test]
    fn test_frame_count() {
        let config = FunnelConfig::default();
        let funnels = vec![
            Funnel::new(FunnelShape::Cone, &config).unwrap(),
            Funnel::new(FunnelShape::Cylinder, &config).unwrap(),
        ];
        let longest = funnels.iter().map(|f| f.heights().len()).max().unwrap();
        assert_eq!(frame_count(&funnels), longest);
        assert_eq!(frame_count(&[]), 0);
    }

    #[test]
    fn test_invalid_config() {
        let config = FunnelConfig {
            fps: 0,
            ..FunnelConfig::default()
        };
        assert!(Funnel::new(FunnelShape::Cone, &config).is_err());
        let config = FunnelConfig {
            outlet_area: 0.0,
            ..FunnelConfig::default()
        };
        assert!(Funnel::new(FunnelShape::Cone, &config).is_err());
        let config = FunnelConfig::default();
        assert!(Funnel::with_bounds(FunnelShape::Cone, &config, 1.0, 0.5).is_err());
    }
}
