#![allow(dead_code)]

use bfgs::Objective;

// ─── Rosenbrock (chained) ──────────────────────────────────────────────────
// f(x) = Σ_i (1 - x_i)² + 100·(x_{i+1} - x_i²)², minimum at (1, ..., 1)

pub fn rosenbrock_f64(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        sum += t1 * t1 + 100.0 * t2 * t2;
    }
    sum
}

pub fn rosenbrock_grad(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut grad = vec![0.0; n];
    for i in 0..n - 1 {
        let t1 = 1.0 - x[i];
        let t2 = x[i + 1] - x[i] * x[i];
        grad[i] += -2.0 * t1 - 400.0 * x[i] * t2;
        grad[i + 1] += 200.0 * t2;
    }
    grad
}

pub struct Rosenbrock;

impl Objective<f64> for Rosenbrock {
    fn value(&mut self, x: &[f64]) -> f64 {
        rosenbrock_f64(x)
    }

    fn gradient(&mut self, x: &[f64]) -> Vec<f64> {
        rosenbrock_grad(x)
    }
}

// ─── Ill-conditioned quadratic ─────────────────────────────────────────────
// f(x) = ½ Σ_i 10^(2i/(n-1)) · x_i², condition number 100

pub struct ScaledQuadratic;

fn weight(i: usize, n: usize) -> f64 {
    if n == 1 {
        1.0
    } else {
        10f64.powf(2.0 * i as f64 / (n - 1) as f64)
    }
}

impl Objective<f64> for ScaledQuadratic {
    fn value(&mut self, x: &[f64]) -> f64 {
        let n = x.len();
        0.5 * x
            .iter()
            .enumerate()
            .map(|(i, &xi)| weight(i, n) * xi * xi)
            .sum::<f64>()
    }

    fn gradient(&mut self, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        x.iter()
            .enumerate()
            .map(|(i, &xi)| weight(i, n) * xi)
            .collect()
    }
}

// ─── Helpers ───────────────────────────────────────────────────────────────

pub fn make_input(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.5 + 0.01 * i as f64).collect()
}

pub fn make_direction(n: usize) -> Vec<f64> {
    (0..n).map(|i| -0.1 * (i + 1) as f64).collect()
}
