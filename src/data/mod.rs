//! Data layer: the dataset model, row filtering, and in-memory adapters.
//!
//! Architecture:
//! ```text
//!  JSON records / Arrow RecordBatch        (produced by the host)
//!        │
//!        ▼
//!   ┌────────────────────┐
//!   │ records / batch     │  convert → Dataset
//!   └────────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  named columns, ordered rows of Value cells
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  threshold predicates → row indices
//!   └──────────┘
//! ```

pub mod batch;
pub mod filter;
pub mod model;
pub mod records;
