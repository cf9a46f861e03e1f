use log::{debug, warn};

use crate::config::MergeOptions;
use crate::data::model::{stable_order, Dataset, Value};
use crate::error::{AlignError, Result};

// ---------------------------------------------------------------------------
// Greedy tolerance pairing
// ---------------------------------------------------------------------------

/// Pair rows of two key columns whose keys differ by at most `tolerance`.
///
/// Both key columns are walked in ascending order (stable among ties) with
/// one cursor each. On a match both cursors advance; otherwise the cursor on
/// the smaller key advances. Returns `(left_row, right_row)` pairs in the
/// original row numbering, ordered by ascending key.
///
/// The pairing is greedy: a consumed row is never reconsidered, even if a
/// closer partner shows up further down.
///
/// Callers guarantee that neither slice contains NaN and `tolerance >= 0`.
pub fn greedy_pairs(left_keys: &[f64], right_keys: &[f64], tolerance: f64) -> Vec<(usize, usize)> {
    let left_order = stable_order(left_keys);
    let right_order = stable_order(right_keys);

    let mut pairs = Vec::with_capacity(left_keys.len().min(right_keys.len()));
    let (mut i, mut j) = (0, 0);
    while i < left_order.len() && j < right_order.len() {
        let (a, b) = (left_order[i], right_order[j]);
        let (ka, kb) = (left_keys[a], right_keys[b]);
        if (ka - kb).abs() <= tolerance {
            pairs.push((a, b));
            i += 1;
            j += 1;
        } else if ka < kb {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

// ---------------------------------------------------------------------------
// Dataset merge
// ---------------------------------------------------------------------------

/// Join two datasets on a real-valued key within `tolerance`.
///
/// Each output row holds every column of the left row (suffixed with
/// `suffix_left`) followed by every column of the right row (suffixed with
/// `suffix_right`). Unmatched rows on either side are dropped.
///
/// # Errors
///
/// * [`AlignError::InvalidTolerance`] if `tolerance` is negative or NaN
/// * [`AlignError::MissingColumn`] if `on` is absent from either dataset
/// * [`AlignError::TypeMismatch`] / [`AlignError::NotANumber`] if a key cell
///   is not an orderable number
/// * [`AlignError::ColumnCollision`] if suffixing yields duplicate names
pub fn merge(
    left: &Dataset,
    right: &Dataset,
    on: &str,
    tolerance: f64,
    suffix_left: &str,
    suffix_right: &str,
) -> Result<Dataset> {
    let options = MergeOptions::with_tolerance(tolerance).suffixes(suffix_left, suffix_right);
    merge_with_tolerance(left, right, on, &options)
}

/// [`merge`] driven by a [`MergeOptions`].
pub fn merge_with_tolerance(
    left: &Dataset,
    right: &Dataset,
    on: &str,
    options: &MergeOptions,
) -> Result<Dataset> {
    options.validate()?;
    let left_keys = left.numeric_column_of(on, "left")?;
    let right_keys = right.numeric_column_of(on, "right")?;
    let (suffix_left, suffix_right) = (&options.suffixes.0, &options.suffixes.1);
    let columns = suffixed_columns(left.columns(), suffix_left, right.columns(), suffix_right)?;

    if options.tolerance > 0.0 {
        warn_on_clustered_keys("left", &left_keys, options.tolerance);
        warn_on_clustered_keys("right", &right_keys, options.tolerance);
    }

    let pairs = greedy_pairs(&left_keys, &right_keys, options.tolerance);
    let rows: Vec<Vec<Value>> = pairs
        .iter()
        .filter_map(|&(a, b)| {
            let (l, r) = (left.row(a)?, right.row(b)?);
            Some(l.iter().chain(r).cloned().collect())
        })
        .collect();

    debug!(
        "merge on '{on}' (tolerance {}): {} pairs, {} left and {} right rows unmatched",
        options.tolerance,
        rows.len(),
        left.len() - rows.len(),
        right.len() - rows.len()
    );
    if rows.is_empty() && !left.is_empty() && !right.is_empty() {
        warn!("merge on '{on}' produced no rows; is the tolerance too tight?");
    }

    Ok(Dataset::from_parts_unchecked(columns, rows))
}

fn suffixed_columns(
    left: &[String],
    suffix_left: &str,
    right: &[String],
    suffix_right: &str,
) -> Result<Vec<String>> {
    let columns: Vec<String> = left
        .iter()
        .map(|c| format!("{c}{suffix_left}"))
        .chain(right.iter().map(|c| format!("{c}{suffix_right}")))
        .collect();

    let mut seen = std::collections::BTreeSet::new();
    for c in &columns {
        if !seen.insert(c.as_str()) {
            return Err(AlignError::ColumnCollision(c.clone()));
        }
    }
    Ok(columns)
}

/// Warn when keys on one side sit closer together than the tolerance: the
/// greedy pass may then pair rows differently than a nearest-neighbour match.
fn warn_on_clustered_keys(side: &str, keys: &[f64], tolerance: f64) {
    let mut sorted = keys.to_vec();
    sorted.sort_by(f64::total_cmp);
    let clustered = sorted.windows(2).filter(|w| w[1] - w[0] <= tolerance).count();
    if clustered > 0 {
        warn!(
            "{side} dataset has {clustered} adjacent key pair(s) within tolerance {tolerance}; \
             greedy pairing takes the first candidate in key order"
        );
    }
}
