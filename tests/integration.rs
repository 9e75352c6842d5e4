use bfgs::{
    bfgs, line_search, minimize, BfgsConfig, ConvergenceParams, FnObjective, TerminationReason,
    WolfeParams,
};

fn sum_squares(x: &[f64]) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

fn sum_squares_grad(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| 2.0 * xi).collect()
}

#[test]
fn minimize_closure_pair() {
    let result = minimize(sum_squares, sum_squares_grad, &[3.0, -1.0, 2.0]).unwrap();

    assert_eq!(result.termination, TerminationReason::GradientNorm);
    assert!(result.x.iter().all(|v| v.abs() < 1e-6));
    assert!(result.value.abs() < 1e-10);
}

#[test]
fn fn_objective_counters_match_result() {
    let mut obj = FnObjective::new(sum_squares, sum_squares_grad);
    let result = bfgs(&mut obj, &[3.0, -1.0], &BfgsConfig::default()).unwrap();

    assert_eq!(obj.func_evals(), result.func_evals);
    assert_eq!(obj.grad_evals(), result.grad_evals);
    // initial point, two line-search trials, and the final re-evaluation
    assert_eq!(result.func_evals, 4);
}

#[test]
fn closures_may_capture_state() {
    let center = vec![1.0, -1.0, 0.5];
    let c = center.clone();
    let result = minimize(
        move |x: &[f64]| x.iter().zip(&c).map(|(xi, ci)| (xi - ci) * (xi - ci)).sum(),
        |x: &[f64]| {
            x.iter()
                .zip([1.0, -1.0, 0.5])
                .map(|(xi, ci)| 2.0 * (xi - ci))
                .collect()
        },
        &[0.0, 0.0, 0.0],
    )
    .unwrap();

    for (xi, ci) in result.x.iter().zip(&center) {
        assert!((xi - ci).abs() < 1e-9);
    }
}

/// The demo driver's objective: f(x) = (sum x)^2 with gradient 2 * (sum x) * x_i.
///
/// That gradient is not the gradient of f, so the run cannot converge; it must
/// still stop at the iteration cap.
#[test]
fn inconsistent_gradient_stops_at_cap() {
    let mut obj = FnObjective::new(
        |x: &[f64]| {
            let s: f64 = x.iter().sum();
            s * s
        },
        |x: &[f64]| {
            let s: f64 = x.iter().sum();
            x.iter().map(|&xi| 2.0 * s * xi).collect()
        },
    );
    let x0: Vec<f64> = (0..5).map(|i| i as f64).collect();
    let config = BfgsConfig {
        convergence: ConvergenceParams {
            max_iter: 50,
            ..Default::default()
        },
        ..Default::default()
    };
    let result = bfgs(&mut obj, &x0, &config).unwrap();

    assert_eq!(result.termination, TerminationReason::MaxIterations);
    assert_eq!(result.iterations, 50);
    assert!(result.line_search_failures > 0);
    assert!(result.x.iter().all(|v| v.is_finite()));
}

#[test]
fn consistent_squared_sum_converges() {
    let result = minimize(
        |x: &[f64]| {
            let s: f64 = x.iter().sum();
            s * s
        },
        |x: &[f64]| {
            let s: f64 = x.iter().sum();
            vec![2.0 * s; x.len()]
        },
        &[0.0, 1.0, 2.0, 3.0, 4.0],
    )
    .unwrap();

    assert_eq!(result.termination, TerminationReason::GradientNorm);
    let s: f64 = result.x.iter().sum();
    assert!(s.abs() < 1e-9, "sum = {}", s);
}

#[test]
fn line_search_contract_from_callbacks() {
    let mut obj = FnObjective::new(sum_squares, sum_squares_grad);
    let x0 = [2.0, -4.0];
    let d = [-4.0, 8.0];
    let ls = line_search(&mut obj, &x0, &d, &WolfeParams::default()).unwrap();

    assert!(ls.wolfe_satisfied);
    assert_eq!(ls.alpha, 0.5);
    assert_eq!(ls.x, vec![0.0, 0.0]);
}
