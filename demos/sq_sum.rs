//! Minimize the squared sum `f(x) = (Σ x_i)²` from `x0 = [0, 1, 2, 3, 4]`.
//!
//! Run with `RUST_LOG=debug` to see per-iteration progress.

use bfgs::{bfgs, BfgsConfig, ConvergenceParams, FnObjective};

fn sq_sum(x: &[f64]) -> f64 {
    let s: f64 = x.iter().sum();
    s * s
}

/// `2 (Σ x) x_i`: not the gradient of `sq_sum`, kept to show a run that never converges.
fn sq_sum_scaled_grad(x: &[f64]) -> Vec<f64> {
    let s: f64 = x.iter().sum();
    x.iter().map(|&xi| 2.0 * s * xi).collect()
}

/// The true gradient `2 (Σ x)` in every component.
fn sq_sum_grad(x: &[f64]) -> Vec<f64> {
    let s: f64 = x.iter().sum();
    vec![2.0 * s; x.len()]
}

fn main() -> Result<(), bfgs::BfgsError> {
    env_logger::init();

    let n = 5;
    let x0: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let config = BfgsConfig {
        convergence: ConvergenceParams {
            max_iter: 1000,
            ..Default::default()
        },
        ..Default::default()
    };

    let cases: [(&str, fn(&[f64]) -> Vec<f64>); 2] = [
        ("exact gradient", sq_sum_grad),
        ("scaled gradient", sq_sum_scaled_grad),
    ];

    for (label, grad) in cases {
        let mut obj = FnObjective::new(sq_sum, grad);
        let result = bfgs(&mut obj, &x0, &config)?;
        println!("{label}:");
        println!("  x = {:?}", result.x);
        println!("  val = {}", result.value);
        println!(
            "  {} after {} iterations ({} function / {} gradient evaluations)",
            result.termination, result.iterations, result.func_evals, result.grad_evals
        );
    }

    Ok(())
}
