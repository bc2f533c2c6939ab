//! Non-graphical rendition of the classic truncated-sample toy figure.
//!
//! Draws a large sample from two truncated normals, truncates it with the
//! symmetric boundary `limit(t) = min(1/(0.5 + t) - 0.5, 1)`, recovers both
//! marginals with the C⁻ estimator and prints them next to the analytic
//! truth. Run with `cargo run --example truncated_normal`.

use cminus::{CminusEstimator, FitGrid, TruncatedSample};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn truncated_normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let normal = Normal::new(mean, std_dev).unwrap();
    loop {
        let v = normal.sample(rng);
        if (0.0..=1.0).contains(&v) {
            return v;
        }
    }
}

fn limit(t: f64) -> f64 {
    (1.0 / (0.5 + t) - 0.5).min(1.0)
}

/// Density of a normal truncated to [0, 1].
fn truncnorm_pdf(t: f64, mean: f64, std_dev: f64) -> f64 {
    let phi = |v: f64| {
        let z = (v - mean) / std_dev;
        (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
    };
    let n_steps = 2000;
    let h = 1.0 / f64::from(n_steps);
    let norm: f64 = (0..n_steps)
        .map(|i| phi((f64::from(i) + 0.5) * h) * h)
        .sum();
    phi(t) / norm
}

fn main() -> cminus::Result<()> {
    let n_raw = 10_000;
    let mut rng = StdRng::seed_from_u64(42);

    let mut x = Vec::with_capacity(n_raw);
    let mut y = Vec::with_capacity(n_raw);
    for _ in 0..n_raw {
        x.push(truncated_normal(&mut rng, 0.66666, 0.33333));
        y.push(truncated_normal(&mut rng, 0.33333, 0.33333));
    }
    let xmax: Vec<f64> = y.iter().map(|&yi| limit(yi)).collect();
    let ymax: Vec<f64> = x.iter().map(|&xi| limit(xi)).collect();

    let sample = TruncatedSample::retain_observable(&x, &y, &xmax, &ymax)?;
    println!(
        "{} of {} raw points survive the truncation boundary",
        sample.len(),
        n_raw
    );

    let grid = FitGrid::linspace(0.0, 1.0, 21)?;
    let estimator = CminusEstimator::builder()
        .n_bootstraps(20)
        .normalize(true)
        .seed(0)
        .build();
    let result = estimator.estimate(&sample, &grid, &grid)?;

    println!();
    println!("  mid   p(x) est   +/-      p(x) true   p(y) est   +/-      p(y) true");
    for (k, mid) in result.x.midpoints.iter().enumerate() {
        println!(
            "  {:.3}  {:8.4}  {:7.4}  {:9.4}  {:9.4}  {:7.4}  {:9.4}",
            mid,
            result.x.density[k],
            result.x.std_error[k],
            truncnorm_pdf(*mid, 0.66666, 0.33333),
            result.y.density[k],
            result.y.std_error[k],
            truncnorm_pdf(*mid, 0.33333, 0.33333),
        );
    }
    Ok(())
}
