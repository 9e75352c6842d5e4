use std::fmt;

use crate::linalg::Matrix;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimResult<F> {
    /// Solution point.
    pub x: Vec<F>,
    /// Objective value at the solution, evaluated afresh at `x`.
    pub value: F,
    /// Gradient at the solution.
    pub gradient: Vec<F>,
    /// Norm of the gradient at the solution.
    pub gradient_norm: F,
    /// Final inverse Hessian approximation.
    pub inverse_hessian: Matrix<F>,
    /// Number of outer iterations performed.
    pub iterations: usize,
    /// Total number of objective function evaluations.
    pub func_evals: usize,
    /// Total number of gradient evaluations.
    pub grad_evals: usize,
    /// Iterations whose inverse Hessian update was skipped for low curvature.
    pub skipped_updates: usize,
    /// Iterations whose inverse Hessian was reset to the identity for low curvature.
    pub hessian_resets: usize,
    /// Line searches that stopped at the step floor without satisfying the Wolfe conditions.
    pub line_search_failures: usize,
    /// Reason for termination.
    pub termination: TerminationReason,
}

impl<F> OptimResult<F> {
    /// `true` if a tolerance test stopped the run.
    pub fn converged(&self) -> bool {
        matches!(
            self.termination,
            TerminationReason::GradientNorm
                | TerminationReason::StepSize
                | TerminationReason::FunctionChange
        )
    }
}

/// Why the optimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Gradient norm fell below tolerance.
    GradientNorm,
    /// Step size fell below tolerance.
    StepSize,
    /// Change in objective value fell below tolerance.
    FunctionChange,
    /// Reached the maximum number of iterations.
    MaxIterations,
    /// The gradient, search direction, or inverse Hessian became non-finite.
    NumericalError,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::GradientNorm => write!(f, "gradient norm below tolerance"),
            TerminationReason::StepSize => write!(f, "step size below tolerance"),
            TerminationReason::FunctionChange => write!(f, "function change below tolerance"),
            TerminationReason::MaxIterations => write!(f, "maximum iterations reached"),
            TerminationReason::NumericalError => write!(f, "numerical error"),
        }
    }
}
