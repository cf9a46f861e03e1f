//! Piecewise-linear interpolation with flat ends.

/// Interpolate `(xp, fp)` at `x`.
///
/// `xp` must be ascending (duplicates allowed) and the same length as `fp`.
/// Below `xp[0]` the result is `fp[0]`; at or above the last abscissa it is
/// the last ordinate. Between samples it is linear between the last sample
/// with `xp[j] <= x` and the next one. An empty table yields NaN.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }
    if x < xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    // xp[j] <= x < xp[j + 1]
    let j = xp[..n].partition_point(|&v| v <= x) - 1;
    if xp[j] == x {
        return fp[j];
    }
    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    slope * (x - xp[j]) + fp[j]
}

/// Interpolate `(xp, fp)` at every point of `grid`.
pub fn interp_onto(grid: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    grid.iter().map(|&x| interp(x, xp, fp)).collect()
}

/// Sorted, deduplicated union of two NaN-free abscissa sets.
pub fn union_grid(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut grid: Vec<f64> = a.iter().chain(b).copied().collect();
    grid.sort_by(f64::total_cmp);
    grid.dedup();
    grid
}
