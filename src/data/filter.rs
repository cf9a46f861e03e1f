// ---------------------------------------------------------------------------
// Strict threshold predicate on a numeric column
// ---------------------------------------------------------------------------

/// Which side of a threshold a row must lie on. Both sides are strict, so a
/// value equal to the threshold passes neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Below(f64),
    Above(f64),
}

impl Threshold {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Threshold::Below(t) => value < t,
            Threshold::Above(t) => value > t,
        }
    }
}

/// Return indices of `values` that pass `threshold`, in input order.
pub fn filtered_indices(values: &[f64], threshold: Threshold) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| threshold.admits(v))
        .map(|(i, _)| i)
        .collect()
}
