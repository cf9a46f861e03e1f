//! Numeric alignment of ordered measurement series.
//!
//! This crate provides:
//! - A tabular [`Dataset`] of named columns and dynamically typed cells
//! - Tolerance merges: greedy one-to-one joins on a real-valued key
//! - Symmetrization of a sweep around a neutral point into symmetric and
//!   antisymmetric components
//! - A caller-owned [`DatasetStore`] and JSON / Arrow adapters
//!
//! # Example
//!
//! ```
//! use sweep_align::{symmetrize, Dataset};
//!
//! let sweep = Dataset::from_f64_columns(vec![
//!     ("B", vec![-2.0, -1.0, 1.0, 2.0]),
//!     ("R", vec![-4.0, -2.0, 2.0, 4.0]),
//! ])
//! .unwrap();
//! let (sym, antisym) = symmetrize(&sweep, "B", &["R"], 0.0).unwrap();
//! assert_eq!(sym.numeric_column("Rsym").unwrap(), vec![0.0, 0.0]);
//! assert_eq!(antisym.numeric_column("Rantisym").unwrap(), vec![2.0, 4.0]);
//! ```

pub mod align;
pub mod config;
pub mod data;
pub mod error;
pub mod store;

pub use align::{merge, merge_with_tolerance, symmetrize, symmetrize_with};
pub use config::{AlignConfig, MergeOptions, SymmetrizeOptions};
pub use data::model::{Dataset, Value};
pub use error::{AlignError, PartitionSide, Result};
pub use store::DatasetStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
