//! Equally spaced grids and piecewise linear resampling.

/// `n` equally spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // keep the end point exact
            grid[n - 1] = end;
            grid
        }
    }
}

/// Resamples `(xs, ys)` at `at` by linear interpolation.
/// `xs` must be increasing; points outside `[xs[0], xs[last]]` take the boundary value.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], at: &[f64]) -> Vec<f64> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return vec![f64::NAN; at.len()];
    }
    at.iter()
        .map(|&x| {
            if x <= xs[0] {
                return ys[0];
            }
            if x >= xs[n - 1] {
                return ys[n - 1];
            }
            // first index with xs[i] > x, 1 <= i <= n-1
            let i = xs[..n].partition_point(|&xi| xi <= x);
            let (x0, x1) = (xs[i - 1], xs[i]);
            let (y0, y1) = (ys[i - 1], ys[i]);
            if x1 == x0 {
                y1
            } else {
                y0 + (y1 - y0) * (x - x0) / (x1 - x0)
            }
        })
        .collect()
}

/// Smallest and largest finite value of a series.
pub fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widens `[lo, hi]` by `fraction` of its span, or by one unit of magnitude if it is degenerate.
pub fn padded(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 1e-12 * hi.abs().max(lo.abs()).max(1.0) {
        (lo - fraction * span, hi + fraction * span)
    } else {
        let pad = lo.abs().max(1.0) * fraction.max(0.05);
        (lo - pad, hi + pad)
    }
}
