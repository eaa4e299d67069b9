//! # Harmonic Oscillator Initial Value Problem
//!
//! A weight of mass `m` hanging on a spring with constant `D`:
//!
//! ```text
//! x' = v
//! v' = -D*x/m
//! ```
//!
//! The right-hand side is built as symbolic expressions and handed to the BDF
//! solver of RustedSciThe. The adaptive solution is then resampled on an equally
//! spaced time grid so that all cases share the same abscissa for plotting and
//! export.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use physdemos::Oscillator::harmonic_oscillator_IVP::HarmonicOscillatorIVP;
//! use physdemos::settings::OscillatorConfig;
//!
//! let mut ivp = HarmonicOscillatorIVP::new(OscillatorConfig::default())?;
//! ivp.solve()?;
//! ivp.plot("harmonic_oscillator.png")?;
//! ```

use crate::Utils::grid::{interpolate_linear, linspace};
use crate::error::DemoError;
use crate::settings::OscillatorConfig;
use RustedSciThe::numerical::ODE_api2::{SolverParam, SolverType, UniversalODESolver};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use log::{debug, info, warn};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One spring/mass combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorCase {
    /// spring constant D
    pub spring_constant: f64,
    /// mass of the weight m
    pub mass: f64,
    /// remark shown next to D in the panel title
    #[serde(default)]
    pub spring_note: Option<String>,
    /// remark shown next to m in the panel title
    #[serde(default)]
    pub mass_note: Option<String>,
}

impl OscillatorCase {
    /// Creates a case; a note on the mass reads "(heavy)", a note on the spring "(strong)".
    pub fn new(spring_constant: f64, mass: f64, note: Option<&str>) -> Self {
        let mut case = Self {
            spring_constant,
            mass,
            spring_note: None,
            mass_note: None,
        };
        match note {
            Some("strong") => case.spring_note = Some("strong".to_string()),
            Some(other) => case.mass_note = Some(other.to_string()),
            None => {}
        }
        case
    }

    /// Angular frequency sqrt(D/m).
    pub fn omega(&self) -> f64 {
        (self.spring_constant / self.mass).sqrt()
    }

    pub fn title(&self) -> String {
        let d = match &self.spring_note {
            Some(note) => format!("D = {} ({})", self.spring_constant, note),
            None => format!("D = {}", self.spring_constant),
        };
        let m = match &self.mass_note {
            Some(note) => format!("m = {} ({})", self.mass, note),
            None => format!("m = {}", self.mass),
        };
        format!("{}, {}", d, m)
    }

    /// Symbolic right-hand side in the unknowns `x`, `v`.
    pub fn equations(&self) -> Vec<Expr> {
        let x = Expr::Var("x".to_owned());
        let v = Expr::Var("v".to_owned());
        let k = Expr::Const(-self.spring_constant / self.mass);
        vec![v, k * x]
    }

    fn check(&self) -> Result<(), DemoError> {
        if !(self.spring_constant > 0.0) {
            return Err(DemoError::InvalidParameter(format!(
                "spring constant must be positive, got {}",
                self.spring_constant
            )));
        }
        if !(self.mass > 0.0) {
            return Err(DemoError::InvalidParameter(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        Ok(())
    }
}

/// Derivative of the state `a = [x, v]`.
pub fn model(a: [f64; 2], spring_constant: f64, mass: f64) -> [f64; 2] {
    let xprime = a[1];
    let vprime = -spring_constant * a[0] / mass;
    [xprime, vprime]
}

/// Closed form amplitude x(t) = x0 cos(wt) + v0/w sin(wt), with t measured from t0.
pub fn analytic_solution(case: &OscillatorCase, x0: f64, v0: f64, t: f64) -> f64 {
    let w = case.omega();
    x0 * (w * t).cos() + v0 / w * (w * t).sin()
}

/// Solution of one case on the common time grid.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub case: OscillatorCase,
    pub x: Vec<f64>,
    pub v: Vec<f64>,
    /// largest deviation of x from the closed form solution
    pub max_abs_error: f64,
}

pub struct HarmonicOscillatorIVP {
    config: OscillatorConfig,
    /// common output grid
    t: Vec<f64>,
    solutions: Vec<Trajectory>,
}

impl HarmonicOscillatorIVP {
    pub fn new(config: OscillatorConfig) -> Result<Self, DemoError> {
        let ivp = Self {
            config,
            t: Vec::new(),
            solutions: Vec::new(),
        };
        ivp.check_task()?;
        Ok(ivp)
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    /// Validates the time span, the grid and every case.
    pub fn check_task(&self) -> Result<(), DemoError> {
        let c = &self.config;
        if !(c.t_max > c.t0) {
            return Err(DemoError::InvalidParameter(format!(
                "t_max ({}) must be larger than t0 ({})",
                c.t_max, c.t0
            )));
        }
        if c.timesteps < 2 {
            return Err(DemoError::InvalidParameter(
                "at least 2 timesteps are required".to_string(),
            ));
        }
        if !(c.rtol > 0.0 && c.atol > 0.0) {
            return Err(DemoError::InvalidParameter(
                "solver tolerances must be positive".to_string(),
            ));
        }
        if c.cases.is_empty() {
            return Err(DemoError::InvalidParameter(
                "no oscillator cases given".to_string(),
            ));
        }
        for case in &c.cases {
            case.check()?;
        }
        Ok(())
    }

    /// Solves every configured case.
    pub fn solve(&mut self) -> Result<(), DemoError> {
        self.check_task()?;
        let c = &self.config;
        self.t = linspace(c.t0, c.t_max, c.timesteps);
        let mut solutions = Vec::with_capacity(c.cases.len());
        for case in &c.cases {
            let trajectory = self.solve_case(case)?;
            info!(
                "{}: solved, max deviation from closed form {:.3e}",
                case.title(),
                trajectory.max_abs_error
            );
            solutions.push(trajectory);
        }
        self.solutions = solutions;
        Ok(())
    }

    fn solve_case(&self, case: &OscillatorCase) -> Result<Trajectory, DemoError> {
        let c = &self.config;
        let grid_step = (c.t_max - c.t0) / (c.timesteps - 1) as f64;
        let max_step = c.max_step.unwrap_or(grid_step);
        let y0 = DVector::from_vec(vec![c.x0, c.v0]);

        let solver_params = HashMap::from([
            ("step_size".to_owned(), SolverParam::Float(grid_step)),
            ("tolerance".to_owned(), SolverParam::Float(c.rtol)),
            ("max_iterations".to_owned(), SolverParam::Int(100000)),
            ("rtol".to_owned(), SolverParam::Float(c.rtol)),
            ("atol".to_owned(), SolverParam::Float(c.atol)),
            ("max_step".to_owned(), SolverParam::Float(max_step)),
            ("first_step".to_owned(), SolverParam::OptionalFloat(None)),
            ("vectorized".to_owned(), SolverParam::Bool(false)),
            ("jac_sparsity".to_owned(), SolverParam::OptionalMatrix(None)),
            ("parallel".to_owned(), SolverParam::Bool(false)),
        ]);
        let mut ode = UniversalODESolver::new(
            case.equations(),
            vec!["x".to_owned(), "v".to_owned()],
            "t".to_owned(),
            SolverType::BDF,
            c.t0,
            y0,
            c.t_max,
        );
        ode.set_parameters(solver_params);
        ode.initialize();
        ode.solve();

        let (t_sol, y_sol) = match ode.get_result() {
            (Some(t), Some(y)) => (t, y),
            _ => {
                return Err(DemoError::Solver(format!(
                    "{}: solver returned no result",
                    case.title()
                )));
            }
        };
        if t_sol.len() < 2 || y_sol.ncols() < 2 || y_sol.nrows() != t_sol.len() {
            return Err(DemoError::Solver(format!(
                "{}: unexpected solution shape {:?} for {} time points",
                case.title(),
                y_sol.shape(),
                t_sol.len()
            )));
        }
        debug!("{}: {} solver steps", case.title(), t_sol.len());

        let t_sol: Vec<f64> = t_sol.iter().copied().collect();
        let x_sol: Vec<f64> = y_sol.column(0).iter().copied().collect();
        let v_sol: Vec<f64> = y_sol.column(1).iter().copied().collect();
        if let Some(last) = t_sol.last() {
            if (last - c.t_max).abs() > grid_step {
                warn!(
                    "{}: solver ended at t = {} instead of {}",
                    case.title(),
                    last,
                    c.t_max
                );
            }
        }

        let x = interpolate_linear(&t_sol, &x_sol, &self.t);
        let v = interpolate_linear(&t_sol, &v_sol, &self.t);
        let max_abs_error = self
            .t
            .iter()
            .zip(&x)
            .map(|(t, x)| (x - analytic_solution(case, c.x0, c.v0, t - c.t0)).abs())
            .fold(0.0, f64::max);

        Ok(Trajectory {
            case: case.clone(),
            x,
            v,
            max_abs_error,
        })
    }

    /// Time grid and the trajectories of all cases. Empty before `solve()`.
    pub fn get_result(&self) -> (&[f64], &[Trajectory]) {
        (&self.t, &self.solutions)
    }

    pub(crate) fn ensure_solved(&self) -> Result<(), DemoError> {
        if self.solutions.is_empty() {
            return Err(DemoError::Solver(
                "no solution yet, call solve() first".to_string(),
            ));
        }
        Ok(())
    }
}
