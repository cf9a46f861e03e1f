// Property-based tests for tolerance merges and symmetrization.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use sweep_align::align::greedy_pairs;
use sweep_align::align::interp::{interp_onto, union_grid};
use sweep_align::{merge, symmetrize, Dataset, Value};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Keys on a coarse lattice so exact collisions actually happen, with both
/// signed zeros mixed in.
fn arb_keys(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    let key = prop_oneof![
        8 => (-200i32..200).prop_map(|k| k as f64 * 0.05),
        1 => Just(0.0),
        1 => Just(-0.0),
    ];
    prop::collection::vec(key, 0..max_len)
}

/// Arbitrary tolerance: usually 0, sometimes positive.
fn arb_tolerance() -> impl Strategy<Value = f64> {
    prop_oneof![
        2 => Just(0.0),
        3 => 0.0..1.0f64,
    ]
}

/// Strictly positive, distinct displacements.
fn arb_displacements() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(1i32..400, 1..12)
        .prop_map(|set| set.into_iter().map(|d| d as f64 * 0.25).collect())
}

fn keyed(keys: &[f64]) -> Dataset {
    Dataset::from_columns(vec![
        ("key", keys.iter().map(|&k| Value::Float(k)).collect()),
        ("row", (0..keys.len() as i64).map(Value::Integer).collect()),
    ])
    .unwrap()
}

fn float_column(ds: &Dataset, name: &str) -> Vec<f64> {
    ds.numeric_column(name).unwrap()
}

// ---------------------------------------------------------------------------
// Merge properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn merged_keys_respect_tolerance(a in arb_keys(40), b in arb_keys(40), t in arb_tolerance()) {
        let merged = merge(&keyed(&a), &keyed(&b), "key", t, "_a", "_b").unwrap();
        let ka = float_column(&merged, "key_a");
        let kb = float_column(&merged, "key_b");
        for (x, y) in ka.iter().zip(&kb) {
            prop_assert!((x - y).abs() <= t, "|{x} - {y}| > {t}");
        }
    }

    #[test]
    fn merged_keys_are_non_decreasing(a in arb_keys(40), b in arb_keys(40), t in arb_tolerance()) {
        let merged = merge(&keyed(&a), &keyed(&b), "key", t, "_a", "_b").unwrap();
        for col in ["key_a", "key_b"] {
            let keys = float_column(&merged, col);
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]), "{col} not sorted: {keys:?}");
        }
    }

    #[test]
    fn equal_keys_keep_input_order(a in arb_keys(40), b in arb_keys(40), t in arb_tolerance()) {
        let merged = merge(&keyed(&a), &keyed(&b), "key", t, "_a", "_b").unwrap();
        for side in ["_a", "_b"] {
            let keys = float_column(&merged, &format!("key{side}"));
            let rows = float_column(&merged, &format!("row{side}"));
            for i in 1..keys.len() {
                if keys[i - 1] == keys[i] {
                    prop_assert!(
                        rows[i - 1] < rows[i],
                        "rows {} and {} with key {} paired out of order on {side}",
                        rows[i - 1], rows[i], keys[i]
                    );
                }
            }
        }
    }

    #[test]
    fn each_row_is_used_at_most_once(a in arb_keys(40), b in arb_keys(40), t in arb_tolerance()) {
        let pairs = greedy_pairs(&a, &b, t);
        prop_assert!(pairs.len() <= a.len().min(b.len()));
        let left: HashSet<usize> = pairs.iter().map(|p| p.0).collect();
        let right: HashSet<usize> = pairs.iter().map(|p| p.1).collect();
        prop_assert_eq!(left.len(), pairs.len());
        prop_assert_eq!(right.len(), pairs.len());
    }

    #[test]
    fn zero_tolerance_on_unique_keys_is_an_inner_join(
        a in prop::collection::btree_set(-100i32..100, 0..30),
        b in prop::collection::btree_set(-100i32..100, 0..30),
    ) {
        let ka: Vec<f64> = a.iter().map(|&k| k as f64 * 0.1).collect();
        let kb: Vec<f64> = b.iter().rev().map(|&k| k as f64 * 0.1).collect();

        let merged = merge(&keyed(&ka), &keyed(&kb), "key", 0.0, "_a", "_b").unwrap();

        let expected: Vec<f64> = a.intersection(&b).map(|&k| k as f64 * 0.1).collect();
        prop_assert_eq!(float_column(&merged, "key_a"), expected.clone());
        prop_assert_eq!(float_column(&merged, "key_b"), expected);
    }
}

// ---------------------------------------------------------------------------
// Symmetrization properties
// ---------------------------------------------------------------------------

/// Sweep with samples at `-below` and `+above`, values from `f`.
fn sweep(below: &[f64], above: &[f64], f: impl Fn(f64) -> f64) -> Dataset {
    let index: Vec<f64> = below.iter().map(|d| -d).chain(above.iter().copied()).collect();
    let signal: Vec<f64> = index.iter().map(|&x| f(x)).collect();
    Dataset::from_f64_columns(vec![("B", index), ("R", signal)]).unwrap()
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn halves_are_recovered_from_the_parts(
        below in arb_displacements(),
        above in arb_displacements(),
        coeffs in (-5.0..5.0f64, -5.0..5.0f64, -1.0..1.0f64),
    ) {
        let (c0, c1, c2) = coeffs;
        let f = |x: f64| c0 + c1 * x + c2 * x * x;
        let ds = sweep(&below, &above, &f);
        let (sym, anti) = symmetrize(&ds, "B", &["R"], 0.0).unwrap();

        let grid = float_column(&sym, "B");
        prop_assert_eq!(&grid, &float_column(&anti, "B"));
        prop_assert_eq!(&grid, &union_grid(&below, &above));

        let neg_values: Vec<f64> = below.iter().map(|d| f(-d)).collect();
        let pos_values: Vec<f64> = above.iter().map(|&d| f(d)).collect();
        let pos = interp_onto(&grid, &above, &pos_values);
        let neg = interp_onto(&grid, &below, &neg_values);

        let s = float_column(&sym, "Rsym");
        let a = float_column(&anti, "Rantisym");
        for i in 0..grid.len() {
            let scale = 1.0 + pos[i].abs() + neg[i].abs();
            prop_assert!((s[i] + a[i] - pos[i]).abs() <= 1e-12 * scale);
            prop_assert!((s[i] - a[i] - neg[i]).abs() <= 1e-12 * scale);
        }
    }

    #[test]
    fn odd_signal_has_no_symmetric_part(
        grid in arb_displacements(),
        slope in -10.0..10.0f64,
        cubic in -0.1..0.1f64,
    ) {
        let f = |x: f64| slope * x + cubic * x * x * x;
        let ds = sweep(&grid, &grid, &f);
        let (sym, anti) = symmetrize(&ds, "B", &["R"], 0.0).unwrap();

        let xs = float_column(&anti, "B");
        prop_assert_eq!(&xs, &grid);
        for (x, v) in xs.iter().zip(float_column(&sym, "Rsym")) {
            prop_assert!(v.abs() <= 1e-9 * (1.0 + f(*x).abs()));
        }
        for (x, v) in xs.iter().zip(float_column(&anti, "Rantisym")) {
            prop_assert!((v - f(*x)).abs() <= 1e-9 * (1.0 + f(*x).abs()));
        }
    }

    #[test]
    fn even_signal_has_no_antisymmetric_part(
        grid in arb_displacements(),
        offset in -10.0..10.0f64,
        curvature in -2.0..2.0f64,
    ) {
        let f = |x: f64| offset + curvature * x * x;
        let ds = sweep(&grid, &grid, &f);
        let (sym, anti) = symmetrize(&ds, "B", &["R"], 0.0).unwrap();

        let xs = float_column(&sym, "B");
        for (x, v) in xs.iter().zip(float_column(&anti, "Rantisym")) {
            prop_assert!(v.abs() <= 1e-9 * (1.0 + f(*x).abs()));
        }
        for (x, v) in xs.iter().zip(float_column(&sym, "Rsym")) {
            prop_assert!((v - f(*x)).abs() <= 1e-9 * (1.0 + f(*x).abs()));
        }
    }

    #[test]
    fn input_row_order_does_not_matter(
        below in arb_displacements(),
        above in arb_displacements(),
        seed in any::<u64>(),
    ) {
        let ds = sweep(&below, &above, |x| x.sin() + 0.5 * x);
        let mut order: Vec<usize> = (0..ds.len()).collect();
        // Deterministic shuffle keyed by seed.
        let keys: BTreeMap<u64, usize> = order
            .iter()
            .map(|&i| ((i as u64).wrapping_mul(6364136223846793005) ^ seed, i))
            .collect();
        order = keys.into_values().collect();
        let shuffled = ds.take(&order);

        let (s1, a1) = symmetrize(&ds, "B", &["R"], 0.0).unwrap();
        let (s2, a2) = symmetrize(&shuffled, "B", &["R"], 0.0).unwrap();
        prop_assert_eq!(s1, s2);
        prop_assert_eq!(a1, a2);
    }
}
