/// Parameters controlling convergence checks.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceParams<F> {
    /// Maximum number of iterations (default: 10 000).
    ///
    /// The loop has no other upper bound: an objective whose gradient never
    /// drops below `grad_tol` stops here with `MaxIterations`.
    pub max_iter: usize,
    /// Gradient norm tolerance: stop when `||g|| <= grad_tol` (default: 1e-12).
    pub grad_tol: F,
    /// Step size tolerance: stop when `||x_{k+1} - x_k|| < step_tol` (default: 0, disabled).
    pub step_tol: F,
    /// Function change tolerance: stop when `|f_{k+1} - f_k| < func_tol` (default: 0, disabled).
    pub func_tol: F,
}

impl Default for ConvergenceParams<f64> {
    fn default() -> Self {
        ConvergenceParams {
            max_iter: 10_000,
            grad_tol: 1e-12,
            step_tol: 0.0,
            func_tol: 0.0,
        }
    }
}

impl Default for ConvergenceParams<f32> {
    fn default() -> Self {
        ConvergenceParams {
            max_iter: 10_000,
            grad_tol: 1e-6,
            step_tol: 0.0,
            func_tol: 0.0,
        }
    }
}

impl<F: num_traits::Float> ConvergenceParams<F> {
    /// `true` once `grad_norm` is within tolerance.
    ///
    /// A NaN norm never counts as converged.
    pub fn gradient_converged(&self, grad_norm: F) -> bool {
        grad_norm <= self.grad_tol
    }

    pub fn step_converged(&self, step_norm: F) -> bool {
        self.step_tol > F::zero() && step_norm < self.step_tol
    }

    pub fn function_converged(&self, f_prev: F, f_new: F) -> bool {
        self.func_tol > F::zero() && (f_prev - f_new).abs() < self.func_tol
    }
}
