//! The two alignment operations.
//!
//! * [`merge`] pairs rows of two datasets whose real-valued keys lie within
//!   a tolerance, greedily and in key order.
//! * [`symmetrize`] splits a sweep around a neutral point and returns its
//!   symmetric and antisymmetric parts on a shared displacement grid.
//!
//! Both are pure: inputs are borrowed, outputs are fresh datasets.

pub mod interp;
pub mod merge;
pub mod symmetrize;

pub use merge::{greedy_pairs, merge, merge_with_tolerance};
pub use symmetrize::{symmetrize, symmetrize_with};
