use log::trace;
use num_traits::Float;

use crate::error::{BfgsError, BfgsResult};
use crate::linalg::dot;
use crate::objective::{checked_gradient, Objective};

/// Parameters for the backtracking Wolfe line search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WolfeParams<F> {
    /// Sufficient decrease (Armijo) parameter (default: 1e-4).
    pub c1: F,
    /// Curvature parameter (default: 0.9).
    pub c2: F,
    /// Backtracking factor (default: 0.5).
    pub rho: F,
    /// Initial step size (default: 1.0).
    pub alpha_init: F,
    /// Step floor: a trial below it is returned without testing (default: 1e-9).
    pub alpha_min: F,
}

impl Default for WolfeParams<f64> {
    fn default() -> Self {
        WolfeParams {
            c1: 1e-4,
            c2: 0.9,
            rho: 0.5,
            alpha_init: 1.0,
            alpha_min: 1e-9,
        }
    }
}

impl Default for WolfeParams<f32> {
    fn default() -> Self {
        WolfeParams {
            c1: 1e-4,
            c2: 0.9,
            rho: 0.5,
            alpha_init: 1.0,
            alpha_min: 1e-9,
        }
    }
}

impl<F: Float> WolfeParams<F> {
    /// Check `0 < c1 < c2 < 1`, `0 < rho < 1`, and positive finite step bounds.
    ///
    /// These are exactly the conditions under which the search terminates.
    pub fn validate(&self) -> BfgsResult<()> {
        let zero = F::zero();
        let one = F::one();
        if !(self.c1 > zero && self.c1 < one) {
            return Err(invalid("line_search.c1", "must lie in (0, 1)"));
        }
        if !(self.c2 > self.c1 && self.c2 < one) {
            return Err(invalid("line_search.c2", "must lie in (c1, 1)"));
        }
        if !(self.rho > zero && self.rho < one) {
            return Err(invalid("line_search.rho", "must lie in (0, 1)"));
        }
        if !(self.alpha_init.is_finite() && self.alpha_init > zero) {
            return Err(invalid("line_search.alpha_init", "must be positive and finite"));
        }
        if !(self.alpha_min.is_finite() && self.alpha_min > zero) {
            return Err(invalid("line_search.alpha_min", "must be positive and finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> BfgsError {
    BfgsError::InvalidConfig { field, reason }
}

/// Result of a line search.
#[derive(Debug)]
pub struct LineSearchResult<F> {
    /// The returned point `x + alpha * d`.
    pub x: Vec<F>,
    /// The step size used to reach `x`.
    pub alpha: F,
    /// Objective value at `x`.
    pub value: F,
    /// Gradient at `x`.
    pub gradient: Vec<F>,
    /// Number of points evaluated (one value and one gradient each).
    pub evals: usize,
    /// `false` when the step fell below `alpha_min`; `x` then need not
    /// satisfy either Wolfe condition.
    pub wolfe_satisfied: bool,
}

/// Backtracking line search accepting the first step that satisfies both Wolfe conditions.
///
/// Starting from `alpha_init`, tries `x + alpha*d` and accepts when
///
/// - `f(x + alpha*d) <= f(x) + c1 * alpha * d^T g` (Armijo), and
/// - `d^T ∇f(x + alpha*d) >= c2 * d^T g` (curvature),
///
/// otherwise multiplies `alpha` by `rho`. Once `alpha < alpha_min` the current
/// candidate is returned as-is with `wolfe_satisfied = false`.
///
/// `d` is assumed to be a descent direction; this is not checked.
pub fn backtracking_wolfe<F: Float, O: Objective<F>>(
    obj: &mut O,
    x: &[F],
    d: &[F],
    f_x: F,
    grad_x: &[F],
    params: &WolfeParams<F>,
) -> BfgsResult<LineSearchResult<F>> {
    params.validate()?;

    let n = x.len();
    debug_assert_eq!(d.len(), n);
    let dg = dot(d, grad_x);

    let mut alpha = params.alpha_init;
    let mut x_new = vec![F::zero(); n];
    let mut evals = 0;

    loop {
        for i in 0..n {
            x_new[i] = x[i] + alpha * d[i];
        }

        if alpha < params.alpha_min {
            let gradient = checked_gradient(obj, &x_new)?;
            let value = obj.value(&x_new);
            evals += 1;
            trace!(
                "line search hit step floor after {} trials (alpha={:e})",
                evals - 1,
                alpha.to_f64().unwrap_or(f64::NAN)
            );
            return Ok(LineSearchResult {
                x: x_new,
                alpha,
                value,
                gradient,
                evals,
                wolfe_satisfied: false,
            });
        }

        let g_new = checked_gradient(obj, &x_new)?;
        let f_new = obj.value(&x_new);
        evals += 1;

        let armijo = f_new <= f_x + params.c1 * alpha * dg;
        let curvature = dot(d, &g_new) >= params.c2 * dg;
        trace!(
            "trial alpha={:e}: armijo={} curvature={}",
            alpha.to_f64().unwrap_or(f64::NAN),
            armijo,
            curvature
        );

        if armijo && curvature {
            return Ok(LineSearchResult {
                x: x_new,
                alpha,
                value: f_new,
                gradient: g_new,
                evals,
                wolfe_satisfied: true,
            });
        }

        alpha = alpha * params.rho;
    }
}

/// Line search from `x0` along `d`, evaluating `f(x0)` and `∇f(x0)` first.
///
/// Convenience form of [`backtracking_wolfe`] for callers that do not already
/// hold the objective value and gradient at `x0`.
pub fn line_search<F: Float, O: Objective<F>>(
    obj: &mut O,
    x0: &[F],
    d: &[F],
    params: &WolfeParams<F>,
) -> BfgsResult<LineSearchResult<F>> {
    let grad0 = checked_gradient(obj, x0)?;
    let f0 = obj.value(x0);
    let mut result = backtracking_wolfe(obj, x0, d, f0, &grad0, params)?;
    result.evals += 1;
    Ok(result)
}
