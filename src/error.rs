use thiserror::Error;

/// Errors raised by the alignment operations and the dataset model.
///
/// Every check runs before any scanning or partitioning starts, so an error
/// never comes with a partially built result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("dataset '{dataset}' has no column '{column}'")]
    MissingColumn { dataset: String, column: String },

    #[error("column '{column}', row {row}: expected a number, found {found}")]
    TypeMismatch {
        column: String,
        row: usize,
        found: String,
    },

    #[error("column '{column}', row {row}: NaN cannot be ordered")]
    NotANumber { column: String, row: usize },

    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("neutral point must be a number, got {0}")]
    InvalidNeutralPoint(f64),

    #[error("no rows with '{column}' {side} the neutral point {neutral_point}")]
    EmptyPartition {
        column: String,
        side: PartitionSide,
        neutral_point: f64,
    },

    #[error("at least one objective column is required")]
    NoObjectiveColumns,

    #[error("output column '{0}' would appear twice")]
    ColumnCollision(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("no dataset stored under '{0}'")]
    UnknownDataset(String),
}

/// Which half of a neutral-point split came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionSide {
    Below,
    Above,
}

impl std::fmt::Display for PartitionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionSide::Below => write!(f, "below"),
            PartitionSide::Above => write!(f, "above"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
