//! Dense BFGS minimization with a backtracking Wolfe line search.
//!
//! Supply an [`Objective`] (or a value closure and a gradient closure via
//! [`minimize`] / [`FnObjective`]) and a starting point; [`bfgs`] iterates
//! until the gradient norm drops below tolerance and returns an
//! [`OptimResult`] with the point, a fresh objective value there, and a
//! [`TerminationReason`].
//!
//! ```
//! let result = bfgs::minimize(
//!     |x: &[f64]| (x[0] - 3.0).powi(2),
//!     |x: &[f64]| vec![2.0 * (x[0] - 3.0)],
//!     &[0.0],
//! )
//! .unwrap();
//! assert!((result.x[0] - 3.0).abs() < 1e-9);
//! assert!(result.converged());
//! ```

pub mod convergence;
pub mod error;
pub mod linalg;
pub mod line_search;
pub mod objective;
pub mod result;
pub mod solvers;

pub use convergence::ConvergenceParams;
pub use error::{BfgsError, BfgsResult};
pub use line_search::{backtracking_wolfe, line_search, LineSearchResult, WolfeParams};
pub use objective::{FnObjective, Objective};
pub use result::{OptimResult, TerminationReason};
pub use solvers::bfgs::{bfgs, BfgsConfig, CurvaturePolicy};

/// Minimize `f` from `x0` given its gradient `grad`, with the default configuration.
pub fn minimize<V, G>(f: V, grad: G, x0: &[f64]) -> BfgsResult<OptimResult<f64>>
where
    V: FnMut(&[f64]) -> f64,
    G: FnMut(&[f64]) -> Vec<f64>,
{
    let mut obj = FnObjective::new(f, grad);
    bfgs(&mut obj, x0, &BfgsConfig::default())
}
