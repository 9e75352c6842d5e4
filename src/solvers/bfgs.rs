use log::{debug, warn};
use num_traits::Float;

use crate::convergence::ConvergenceParams;
use crate::error::{BfgsError, BfgsResult};
use crate::line_search::{backtracking_wolfe, WolfeParams};
use crate::linalg::{
    bfgs_inverse_update, dot, identity, is_finite_matrix, is_finite_vec, matvec, norm, quad_form,
    Matrix,
};
use crate::objective::{checked_gradient, Objective};
use crate::result::{OptimResult, TerminationReason};

/// What to do with the inverse Hessian when `s^T y` is too small to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurvaturePolicy {
    /// Keep the previous inverse Hessian for this iteration.
    #[default]
    Skip,
    /// Restart from the identity.
    Reset,
    /// Always apply the update. A vanishing `s^T y` then fills the matrix with
    /// NaN/inf and the run ends with [`TerminationReason::NumericalError`].
    Unguarded,
}

/// Configuration for the BFGS solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfgsConfig<F> {
    /// Convergence parameters.
    pub convergence: ConvergenceParams<F>,
    /// Line search parameters.
    pub line_search: WolfeParams<F>,
    /// Handling of near-zero curvature (default: [`CurvaturePolicy::Skip`]).
    pub curvature: CurvaturePolicy,
    /// The update counts as degenerate when `s^T y <= curvature_tol * ||s|| * ||y||`
    /// (default: 1e-10 for `f64`, 1e-6 for `f32`).
    pub curvature_tol: F,
}

impl Default for BfgsConfig<f64> {
    fn default() -> Self {
        BfgsConfig {
            convergence: ConvergenceParams::default(),
            line_search: WolfeParams::default(),
            curvature: CurvaturePolicy::default(),
            curvature_tol: 1e-10,
        }
    }
}

impl Default for BfgsConfig<f32> {
    fn default() -> Self {
        BfgsConfig {
            convergence: ConvergenceParams::default(),
            line_search: WolfeParams::default(),
            curvature: CurvaturePolicy::default(),
            curvature_tol: 1e-6,
        }
    }
}

impl<F: Float> BfgsConfig<F> {
    /// Reject settings under which a run cannot terminate or is meaningless.
    pub fn validate(&self) -> BfgsResult<()> {
        let c = &self.convergence;
        if c.max_iter == 0 {
            return Err(invalid("convergence.max_iter", "must be at least 1"));
        }
        if !non_negative(c.grad_tol) {
            return Err(invalid("convergence.grad_tol", "must be finite and non-negative"));
        }
        if !non_negative(c.step_tol) {
            return Err(invalid("convergence.step_tol", "must be finite and non-negative"));
        }
        if !non_negative(c.func_tol) {
            return Err(invalid("convergence.func_tol", "must be finite and non-negative"));
        }
        if !non_negative(self.curvature_tol) {
            return Err(invalid("curvature_tol", "must be finite and non-negative"));
        }
        self.line_search.validate()
    }
}

fn non_negative<F: Float>(v: F) -> bool {
    v.is_finite() && v >= F::zero()
}

fn invalid(field: &'static str, reason: &'static str) -> BfgsError {
    BfgsError::InvalidConfig { field, reason }
}

fn as_f64<F: Float>(v: F) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

/// Iterate state carried between BFGS steps.
struct State<F> {
    x: Vec<F>,
    f_val: F,
    grad: Vec<F>,
    grad_norm: F,
    inv_hessian: Matrix<F>,
    iterations: usize,
    func_evals: usize,
    grad_evals: usize,
    skipped_updates: usize,
    hessian_resets: usize,
    line_search_failures: usize,
}

impl<F: Float> State<F> {
    /// Build the result, re-evaluating the objective at a copy of the final point.
    fn finish<O: Objective<F>>(
        mut self,
        obj: &mut O,
        termination: TerminationReason,
    ) -> OptimResult<F> {
        let x = self.x.clone();
        let value = obj.value(&x);
        self.func_evals += 1;
        debug!(
            "bfgs stopped after {} iterations: {} (f={:e}, |g|={:e})",
            self.iterations,
            termination,
            as_f64(value),
            as_f64(self.grad_norm)
        );
        OptimResult {
            x,
            value,
            gradient: self.grad,
            gradient_norm: self.grad_norm,
            inverse_hessian: self.inv_hessian,
            iterations: self.iterations,
            func_evals: self.func_evals,
            grad_evals: self.grad_evals,
            skipped_updates: self.skipped_updates,
            hessian_resets: self.hessian_resets,
            line_search_failures: self.line_search_failures,
            termination,
        }
    }
}

/// BFGS optimization with a dense inverse Hessian approximation.
///
/// Minimizes `obj` starting from `x0`. The inverse Hessian starts at the
/// identity; each iteration moves along `p = -H g` with a backtracking Wolfe
/// line search and applies the rank-2 BFGS update with `s = alpha * p` and
/// `y = g_{k+1} - g_k`.
///
/// Returns `Err` only for inputs that cannot be run: an empty `x0`, an invalid
/// `config`, or a gradient of the wrong length. Every other outcome, including
/// hitting `max_iter` and numerical breakdown, is an `Ok` result whose
/// [`termination`](OptimResult::termination) says why the run stopped.
pub fn bfgs<F: Float, O: Objective<F>>(
    obj: &mut O,
    x0: &[F],
    config: &BfgsConfig<F>,
) -> BfgsResult<OptimResult<F>> {
    config.validate()?;
    let n = x0.len();
    if n == 0 {
        return Err(BfgsError::EmptyStart);
    }

    let x = x0.to_vec();
    let grad = checked_gradient(obj, &x)?;
    let f_val = obj.value(&x);
    let grad_norm = norm(&grad);

    let mut st = State {
        x,
        f_val,
        grad,
        grad_norm,
        inv_hessian: identity(n),
        iterations: 0,
        func_evals: 1,
        grad_evals: 1,
        skipped_updates: 0,
        hessian_resets: 0,
        line_search_failures: 0,
    };

    let conv = &config.convergence;

    for iter in 0..conv.max_iter {
        if !st.grad_norm.is_finite() {
            warn!("non-finite gradient norm at iteration {}", iter);
            return Ok(st.finish(obj, TerminationReason::NumericalError));
        }
        if conv.gradient_converged(st.grad_norm) {
            return Ok(st.finish(obj, TerminationReason::GradientNorm));
        }

        // Search direction p = -H g
        let p: Vec<F> = matvec(&st.inv_hessian, &st.grad)
            .into_iter()
            .map(|v| -v)
            .collect();
        if !is_finite_vec(&p) {
            warn!("non-finite search direction at iteration {}", iter);
            return Ok(st.finish(obj, TerminationReason::NumericalError));
        }

        let ls = backtracking_wolfe(obj, &st.x, &p, st.f_val, &st.grad, &config.line_search)?;
        st.func_evals += ls.evals;
        st.grad_evals += ls.evals;
        if !ls.wolfe_satisfied {
            st.line_search_failures += 1;
            warn!(
                "line search reached step floor at iteration {} (alpha={:e}); taking it anyway",
                iter,
                as_f64(ls.alpha)
            );
        }

        let s: Vec<F> = p.iter().map(|&pi| ls.alpha * pi).collect();
        let y: Vec<F> = ls
            .gradient
            .iter()
            .zip(st.grad.iter())
            .map(|(&g_new, &g_old)| g_new - g_old)
            .collect();
        let s_ty = dot(&s, &y);
        let step_norm = norm(&s);

        // NaN s_ty also counts as degenerate
        let degenerate = !(s_ty > config.curvature_tol * step_norm * norm(&y));
        match config.curvature {
            CurvaturePolicy::Skip if degenerate => {
                st.skipped_updates += 1;
                warn!(
                    "skipping inverse Hessian update at iteration {}: s^T y = {:e}",
                    iter,
                    as_f64(s_ty)
                );
            }
            CurvaturePolicy::Reset if degenerate => {
                st.hessian_resets += 1;
                warn!(
                    "resetting inverse Hessian at iteration {}: s^T y = {:e}",
                    iter,
                    as_f64(s_ty)
                );
                st.inv_hessian = identity(n);
            }
            _ => {
                let y_hy = quad_form(&st.inv_hessian, &y);
                st.inv_hessian = bfgs_inverse_update(&st.inv_hessian, &s, &y, s_ty, y_hy);
            }
        }

        let f_prev = st.f_val;
        st.x = ls.x;
        st.f_val = ls.value;
        st.grad = ls.gradient;
        st.grad_norm = norm(&st.grad);
        st.iterations = iter + 1;

        debug!(
            "iter {}: f={:e} |g|={:e} alpha={:e} s^T y={:e}",
            st.iterations,
            as_f64(st.f_val),
            as_f64(st.grad_norm),
            as_f64(ls.alpha),
            as_f64(s_ty)
        );

        if !is_finite_matrix(&st.inv_hessian) {
            warn!("inverse Hessian became non-finite at iteration {}", iter);
            return Ok(st.finish(obj, TerminationReason::NumericalError));
        }
        if conv.step_converged(step_norm) {
            return Ok(st.finish(obj, TerminationReason::StepSize));
        }
        if conv.function_converged(f_prev, st.f_val) {
            return Ok(st.finish(obj, TerminationReason::FunctionChange));
        }
    }

    let termination = if !st.grad_norm.is_finite() {
        TerminationReason::NumericalError
    } else if conv.gradient_converged(st.grad_norm) {
        TerminationReason::GradientNorm
    } else {
        TerminationReason::MaxIterations
    };
    Ok(st.finish(obj, termination))
}
