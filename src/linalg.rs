use num_traits::Float;

/// Dense square matrix stored as `m[row][col]`.
pub type Matrix<F> = Vec<Vec<F>>;

/// Compute the dot product of two vectors.
pub fn dot<F: Float>(a: &[F], b: &[F]) -> F {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .fold(F::zero(), |acc, (&ai, &bi)| acc + ai * bi)
}

/// Compute the L2 norm of a vector.
pub fn norm<F: Float>(v: &[F]) -> F {
    dot(v, v).sqrt()
}

/// `n x n` identity matrix.
pub fn identity<F: Float>(n: usize) -> Matrix<F> {
    let mut m = vec![vec![F::zero(); n]; n];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = F::one();
    }
    m
}

/// Matrix-vector product `A * x`.
pub fn matvec<F: Float>(a: &[Vec<F>], x: &[F]) -> Vec<F> {
    a.iter().map(|row| dot(row, x)).collect()
}

/// Vector-matrix product `x^T * A`, returned as a column.
// Column access drives the loop; iterator form obscures it
#[allow(clippy::needless_range_loop)]
pub fn vecmat<F: Float>(x: &[F], a: &[Vec<F>]) -> Vec<F> {
    let n = x.len();
    let mut out = vec![F::zero(); n];
    for k in 0..n {
        let xk = x[k];
        for j in 0..n {
            out[j] = out[j] + xk * a[k][j];
        }
    }
    out
}

/// Quadratic form `y^T * A * y`.
pub fn quad_form<F: Float>(a: &[Vec<F>], y: &[F]) -> F {
    dot(y, &matvec(a, y))
}

/// `true` if every entry of `m` is finite.
pub fn is_finite_matrix<F: Float>(m: &[Vec<F>]) -> bool {
    m.iter().all(|row| row.iter().all(|v| v.is_finite()))
}

/// `true` if every component of `v` is finite.
pub fn is_finite_vec<F: Float>(v: &[F]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// BFGS update of the inverse Hessian approximation.
///
/// Returns a new matrix
///
/// ```text
/// H'[i][j] = H[i][j] + (sTy + yHy) * s_i * s_j / sTy^2
///            - sum_k (H[i][k] * y_k * s_j + s_i * y_k * H[k][j]) / sTy
/// ```
///
/// with `sTy = <s, y>` and `yHy = y^T H y` supplied by the caller. The `k`
/// sums are `(H y)_i` and `(y^T H)_j`, computed once each.
///
/// No guard is applied: `sTy == 0` yields non-finite entries.
// Explicit indexing mirrors the closed form
#[allow(clippy::needless_range_loop)]
pub fn bfgs_inverse_update<F: Float>(
    h: &[Vec<F>],
    s: &[F],
    y: &[F],
    s_ty: F,
    y_hy: F,
) -> Matrix<F> {
    let n = s.len();
    let hy = matvec(h, y);
    let yh = vecmat(y, h);
    let outer_coef = (s_ty + y_hy) / (s_ty * s_ty);

    let mut out = vec![vec![F::zero(); n]; n];
    for i in 0..n {
        for j in 0..n {
            out[i][j] =
                h[i][j] + outer_coef * s[i] * s[j] - (hy[i] * s[j] + s[i] * yh[j]) / s_ty;
        }
    }
    out
}
