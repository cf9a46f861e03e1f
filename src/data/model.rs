use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{AlignError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell of a dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a measurement table carries.
///
/// Key, index and objective columns must hold `Float` or `Integer`; every
/// other column is passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Interpret the cell as an `f64`. Only numeric cells qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Short dtype label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

// ---------------------------------------------------------------------------
// Dataset – ordered rows over a fixed set of named columns
// ---------------------------------------------------------------------------

/// An ordered table: every row has exactly one cell per column.
///
/// Column names are unique. Rows keep their insertion order; nothing about
/// the layout implies sortedness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from a header and row-major cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        check_unique(&columns)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AlignError::Schema(format!(
                    "row {i} has {} cells but there are {} columns",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// A dataset with the given header and no rows.
    pub fn empty(columns: Vec<String>) -> Result<Self> {
        Self::new(columns, Vec::new())
    }

    /// Build a dataset from named, equally long columns.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, cells)| cells.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut cols = Vec::with_capacity(columns.len());
        for (name, cells) in columns {
            let name = name.into();
            if cells.len() != n_rows {
                return Err(AlignError::Schema(format!(
                    "column '{name}' has {} cells, expected {n_rows}",
                    cells.len()
                )));
            }
            names.push(name);
            cols.push(cells.into_iter());
        }

        let rows = (0..n_rows)
            .map(|_| cols.iter_mut().filter_map(|cells| cells.next()).collect())
            .collect();
        Self::new(names, rows)
    }

    /// Build a dataset whose cells are all floats.
    pub fn from_f64_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| (name, values.into_iter().map(Value::Float).collect()))
                .collect(),
        )
    }

    pub(crate) fn from_parts_unchecked(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Append a row; its width must match the header.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(AlignError::Schema(format!(
                "row has {} cells but there are {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Read a column as floats, failing on absent columns and non-numeric cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        self.numeric_column_of(name, "dataset")
    }

    /// Same as [`Dataset::numeric_column`], naming the dataset in errors.
    pub(crate) fn numeric_column_of(&self, name: &str, label: &str) -> Result<Vec<f64>> {
        let idx = self.require_column(name, label)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| match cells[idx].as_f64() {
                Some(v) if v.is_nan() => Err(AlignError::NotANumber {
                    column: name.to_string(),
                    row,
                }),
                Some(v) => Ok(v),
                None => Err(AlignError::TypeMismatch {
                    column: name.to_string(),
                    row,
                    found: cells[idx].type_name().to_string(),
                }),
            })
            .collect()
    }

    pub(crate) fn require_column(&self, name: &str, label: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| AlignError::MissingColumn {
                dataset: label.to_string(),
                column: name.to_string(),
            })
    }

    /// Keep only the named columns, in the order given.
    pub fn select(&self, names: &[&str]) -> Result<Dataset> {
        let indices = names
            .iter()
            .map(|n| self.require_column(n, "dataset"))
            .collect::<Result<Vec<_>>>()?;
        let columns: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        check_unique(&columns)?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(Self::from_parts_unchecked(columns, rows))
    }

    /// Copy of the rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Dataset {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Self::from_parts_unchecked(self.columns.clone(), rows)
    }

    /// Copy sorted ascending by a numeric column.
    ///
    /// The sort is stable: rows with equal keys keep their relative order.
    pub fn sorted_by(&self, column: &str) -> Result<Dataset> {
        let keys = self.numeric_column(column)?;
        let order = stable_order(&keys);
        Ok(self.take(&order))
    }

    /// Copy with columns renamed according to `mapping` (old → new).
    ///
    /// Names absent from the dataset are ignored.
    pub fn rename_columns(&self, mapping: &BTreeMap<String, String>) -> Result<Dataset> {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| mapping.get(c).cloned().unwrap_or_else(|| c.clone()))
            .collect();
        check_unique(&columns)?;
        Ok(Self::from_parts_unchecked(columns, self.rows.clone()))
    }
}

/// Row permutation that sorts `keys` ascending, stable among ties.
///
/// Ties are numeric, so `-0.0` and `0.0` compare equal. Callers guarantee
/// `keys` is NaN-free.
pub(crate) fn stable_order(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal));
    order
}

fn check_unique(columns: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for c in columns {
        if !seen.insert(c.as_str()) {
            return Err(AlignError::Schema(format!("duplicate column '{c}'")));
        }
    }
    Ok(())
}
