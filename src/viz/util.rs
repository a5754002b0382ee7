//! Small helpers: axis bounds and autosave file naming.

use chrono::{DateTime, TimeZone};

/// Autosave file name for a timestamp, e.g. `05-17-2026-14-03-59.120.png`.
pub fn autosave_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%m-%d-%Y-%H-%M-%S%.3f.png").to_string()
}

/// Widen a degenerate or inverted range so plotters gets a non-empty axis.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Min/max over finite values; `None` when there are none.
pub fn finite_extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Padded x and y ranges over every point.
pub fn xy_bounds<'a, I>(points: I) -> Option<((f64, f64), (f64, f64))>
where
    I: IntoIterator<Item = &'a (f64, f64)> + Clone,
{
    let (x0, x1) = finite_extent(points.clone().into_iter().map(|p| p.0))?;
    let (y0, y1) = finite_extent(points.into_iter().map(|p| p.1))?;
    Some((padded_range(x0, x1), padded_range(y0, y1)))
}

/// Tick label with fewer decimals for larger magnitudes.
pub fn tick_label(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}
