//! Numeric helpers for sampled signals.

/// Rounds `value` to `decimals` places, half away from zero.
pub fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Evenly spaced values from `start` to `stop` inclusive.
///
/// A single sample yields `[start]`.
pub fn linear_ramp(start: f64, stop: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (samples - 1) as f64;
            (0..samples)
                .map(|i| start - (start - stop) * i as f64 / last)
                .collect()
        }
    }
}

/// Trapezoidal integral of `y` over `x`.
///
/// Pairs beyond the shorter slice are ignored; fewer than two samples give `0.0`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(y, x)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum()
}
