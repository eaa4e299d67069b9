//! # Funnel shapes
//!
//! A funnel is a surface of revolution: its wall is given by the radius `r(h)`
//! at every height `h` between the outlet (`h = 0`) and the rim (`h = H`).
//!
//! | Shape              | r(h)                                                    |
//! |--------------------|---------------------------------------------------------|
//! | `Standard`         | `r0 + h`                                                |
//! | `Cone`             | straight wall from `r0` to the rim radius giving volume V |
//! | `HalfSphere`       | `max(r0, sqrt(H^2 - (H-h)^2))`                          |
//! | `Sphere`           | `max(r0, sqrt(R^2/4 - (h-R/2)^2))`, `R = H + 0.001`     |
//! | `SphereNormalised` | `Sphere` rescaled to volume V                           |
//! | `Cylinder`         | `sqrt(V/(pi*H))`                                        |
//! | `Monomial(beta)`   | `h^beta` rescaled to volume V                           |
//!
//! `r0 = sqrt(s/pi)` is the radius of the outlet pipe of cross-section `s`.

use crate::Utils::grid::linspace;
use crate::error::DemoError;
use crate::settings::FunnelConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Offset that keeps the sphere's bottom tangent point above the outlet.
const SPHERE_EPS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FunnelShape {
    Standard,
    Cone,
    HalfSphere,
    Sphere,
    SphereNormalised,
    Cylinder,
    Monomial(f64),
}

impl fmt::Display for FunnelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunnelShape::Standard => write!(f, "standard"),
            FunnelShape::Cone => write!(f, "cone"),
            FunnelShape::HalfSphere => write!(f, "half-sphere"),
            FunnelShape::Sphere => write!(f, "sphere"),
            FunnelShape::SphereNormalised => write!(f, "sphere-normalised"),
            FunnelShape::Cylinder => write!(f, "cylinder"),
            FunnelShape::Monomial(beta) => write!(f, "monomial:{}", beta),
        }
    }
}

impl FromStr for FunnelShape {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "standard" => Ok(FunnelShape::Standard),
            "cone" => Ok(FunnelShape::Cone),
            "half-sphere" | "halfsphere" => Ok(FunnelShape::HalfSphere),
            "sphere" => Ok(FunnelShape::Sphere),
            "sphere-normalised" | "sphere-normalized" => Ok(FunnelShape::SphereNormalised),
            "cylinder" => Ok(FunnelShape::Cylinder),
            other => match other.strip_prefix("monomial:") {
                Some(beta) => beta.parse::<f64>().map(FunnelShape::Monomial).map_err(|_| {
                    DemoError::InvalidParameter(format!("invalid monomial exponent '{}'", beta))
                }),
                None => Err(DemoError::InvalidParameter(format!(
                    "unknown funnel shape '{}'",
                    other
                ))),
            },
        }
    }
}

impl FunnelShape {
    /// Shapes whose radius is rescaled so that the funnel holds the reference volume.
    pub fn is_normalised(&self) -> bool {
        matches!(
            self,
            FunnelShape::SphereNormalised | FunnelShape::Monomial(_)
        )
    }

    /// Parses a comma separated list such as `cone,cylinder,monomial:2`.
    pub fn parse_list(list: &str) -> Result<Vec<FunnelShape>, DemoError> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(FunnelShape::from_str)
            .collect()
    }
}

/// Radius as a function of height for one shape and one set of funnel parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusProfile {
    pub shape: FunnelShape,
    /// outlet radius r0
    low_r: f64,
    height: f64,
    volume: f64,
    /// normalisation factor, 1 for shapes that are not rescaled
    scale: f64,
    /// rim radius of the cone
    big_r: f64,
}

impl RadiusProfile {
    pub fn new(shape: FunnelShape, config: &FunnelConfig) -> Result<Self, DemoError> {
        Self::with_bounds(shape, config, 0.0, config.height)
    }

    /// Profile normalised over `[h_min, h_max]`.
    pub fn with_bounds(
        shape: FunnelShape,
        config: &FunnelConfig,
        h_min: f64,
        h_max: f64,
    ) -> Result<Self, DemoError> {
        let low_r = config.outlet_radius();
        let height = config.height;
        let volume = config.volume;
        let big_r = -low_r / 2.0
            + ((low_r / 2.0).powi(2) - low_r.powi(2) + volume / (PI * height / 3.0)).sqrt();
        let mut profile = Self {
            shape,
            low_r,
            height,
            volume,
            scale: 1.0,
            big_r,
        };
        if shape == FunnelShape::Cone && !big_r.is_finite() {
            return Err(DemoError::InvalidParameter(format!(
                "no cone of height {} holds volume {}",
                height, volume
            )));
        }
        if shape.is_normalised() {
            profile.scale = profile.normalise(h_min, h_max, config.resolution)?;
        }
        Ok(profile)
    }

    fn raw_radius(&self, h: f64) -> f64 {
        let low_r = self.low_r;
        let big_h = self.height;
        match self.shape {
            FunnelShape::Standard => low_r + h,
            FunnelShape::Cone => low_r + h / big_h * (self.big_r - low_r),
            FunnelShape::HalfSphere => low_r.max((big_h.powi(2) - (big_h - h).powi(2)).max(0.0).sqrt()),
            FunnelShape::Sphere | FunnelShape::SphereNormalised => {
                let r = big_h + SPHERE_EPS;
                low_r.max((r.powi(2) / 4.0 - (h - r / 2.0).powi(2)).max(0.0).sqrt())
            }
            FunnelShape::Cylinder => (self.volume / (PI * big_h)).sqrt(),
            FunnelShape::Monomial(beta) => h.max(0.0).powf(beta),
        }
    }

    /// Scale factor sqrt(V / V_estimated), where the volume of the raw shape is
    /// estimated with a Riemann sum over `resolution` heights.
    fn normalise(&self, h_min: f64, h_max: f64, resolution: usize) -> Result<f64, DemoError> {
        let hh = linspace(h_min, h_max, resolution);
        let sum_sq: f64 = hh.iter().map(|h| self.raw_radius(*h).powi(2)).sum();
        let vol_actually = PI * sum_sq * (h_max - h_min) / resolution as f64;
        if !(vol_actually > 0.0) || !vol_actually.is_finite() {
            return Err(DemoError::InvalidParameter(format!(
                "shape {} encloses no volume and cannot be normalised",
                self.shape
            )));
        }
        Ok((self.volume / vol_actually).sqrt())
    }

    pub fn radius(&self, h: f64) -> f64 {
        self.raw_radius(h) * self.scale
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}
