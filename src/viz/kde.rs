//! Gaussian kernel density estimate for density curves.

use std::f64::consts::PI;

/// Silverman's rule of thumb: `0.9 · min(σ, IQR/1.34) · n^(-1/5)`.
///
/// Falls back to σ, then to 1.0, when the spread measures vanish.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let n = v.len();
    if n < 2 {
        return 1.0;
    }
    v.sort_by(f64::total_cmp);
    let mean = v.iter().sum::<f64>() / n as f64;
    let var = v.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = var.sqrt();
    let iqr = quantile(&v, 0.75) - quantile(&v, 0.25);
    let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
    if spread > 0.0 {
        0.9 * spread * (n as f64).powf(-0.2)
    } else {
        1.0
    }
}

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Evaluate the density on `n` evenly spaced points spanning the data ± 3 bandwidths.
///
/// Returns an empty curve when there are no finite values.
pub fn density_curve(values: &[f64], bandwidth: f64, n: usize) -> Vec<(f64, f64)> {
    let data: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    if data.is_empty() || n < 2 {
        return Vec::new();
    }
    let h = if bandwidth > 0.0 && bandwidth.is_finite() {
        bandwidth
    } else {
        1.0
    };
    let lo = data.iter().copied().fold(f64::INFINITY, f64::min) - 3.0 * h;
    let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3.0 * h;
    let norm = 1.0 / (data.len() as f64 * h * (2.0 * PI).sqrt());
    (0..n)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (n - 1) as f64;
            let y = data
                .iter()
                .map(|xi| {
                    let u = (x - xi) / h;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm;
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_integrates_to_about_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0];
        let h = silverman_bandwidth(&values);
        let curve = density_curve(&values, h, 2000);
        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum();
        assert!((area - 1.0).abs() < 0.01, "area={area}");
    }

    #[test]
    fn single_point_is_symmetric() {
        let curve = density_curve(&[0.0], 1.0, 101);
        let peak = curve[50];
        assert!(peak.0.abs() < 1e-12);
        assert!((curve[10].1 - curve[90].1).abs() < 1e-12);
    }

    #[test]
    fn bandwidth_fallbacks() {
        assert_eq!(silverman_bandwidth(&[4.0]), 1.0);
        assert_eq!(silverman_bandwidth(&[2.0, 2.0, 2.0]), 1.0);
        assert!(silverman_bandwidth(&[1.0, 2.0, 3.0, 4.0]) > 0.0);
    }

    #[test]
    fn empty_input_gives_empty_curve() {
        assert!(density_curve(&[f64::NAN], 1.0, 10).is_empty());
    }
}
