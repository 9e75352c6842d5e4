use num_traits::Float;

use crate::error::{BfgsError, BfgsResult};

/// Trait for optimization objectives.
///
/// Implementors provide function evaluation and gradient computation.
/// Methods take `&mut self` to allow caching, eval counting, and internal buffers,
/// but the results must depend on `x` alone: the line search calls both
/// repeatedly at arbitrary points along the search direction.
pub trait Objective<F: Float> {
    /// Evaluate `f(x)`.
    fn value(&mut self, x: &[F]) -> F;

    /// Evaluate `∇f(x)`. Must return `x.len()` components.
    fn gradient(&mut self, x: &[F]) -> Vec<F>;
}

/// Adapter wrapping a value closure and a gradient closure as an [`Objective`].
pub struct FnObjective<V, G> {
    value: V,
    gradient: G,
    func_evals: usize,
    grad_evals: usize,
}

impl<V, G> FnObjective<V, G> {
    /// Create a new `FnObjective` from `f` and `∇f`.
    pub fn new(value: V, gradient: G) -> Self {
        FnObjective {
            value,
            gradient,
            func_evals: 0,
            grad_evals: 0,
        }
    }

    /// Number of function evaluations performed so far.
    pub fn func_evals(&self) -> usize {
        self.func_evals
    }

    /// Number of gradient evaluations performed so far.
    pub fn grad_evals(&self) -> usize {
        self.grad_evals
    }
}

impl<F, V, G> Objective<F> for FnObjective<V, G>
where
    F: Float,
    V: FnMut(&[F]) -> F,
    G: FnMut(&[F]) -> Vec<F>,
{
    fn value(&mut self, x: &[F]) -> F {
        self.func_evals += 1;
        (self.value)(x)
    }

    fn gradient(&mut self, x: &[F]) -> Vec<F> {
        self.grad_evals += 1;
        (self.gradient)(x)
    }
}

/// Evaluate the gradient and reject a result whose length differs from `x`.
pub(crate) fn checked_gradient<F: Float, O: Objective<F>>(
    obj: &mut O,
    x: &[F],
) -> BfgsResult<Vec<F>> {
    let g = obj.gradient(x);
    if g.len() != x.len() {
        return Err(BfgsError::DimensionMismatch {
            expected: x.len(),
            found: g.len(),
        });
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_objective_counts_evals() {
        let mut obj = FnObjective::new(
            |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>(),
            |x: &[f64]| x.iter().map(|v| 2.0 * v).collect::<Vec<f64>>(),
        );
        assert_eq!(obj.value(&[1.0, 2.0]), 5.0);
        assert_eq!(obj.gradient(&[1.0, 2.0]), vec![2.0, 4.0]);
        assert_eq!(obj.value(&[0.0, 0.0]), 0.0);
        assert_eq!(obj.func_evals(), 2);
        assert_eq!(obj.grad_evals(), 1);
    }

    #[test]
    fn checked_gradient_rejects_wrong_length() {
        let mut obj = FnObjective::new(|_: &[f64]| 0.0, |_: &[f64]| vec![0.0]);
        let err = checked_gradient(&mut obj, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            BfgsError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
