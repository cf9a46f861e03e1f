use log::debug;

use super::interp::{interp_onto, union_grid};
use crate::config::SymmetrizeOptions;
use crate::data::filter::{filtered_indices, Threshold};
use crate::data::model::{stable_order, Dataset, Value};
use crate::error::{AlignError, PartitionSide, Result};

/// One side of the neutral point: displacements (ascending) and, per
/// objective, the matching samples.
struct Half {
    displacement: Vec<f64>,
    objectives: Vec<Vec<f64>>,
}

impl Half {
    /// Collect the rows at `indices`, mapping their index value through
    /// `to_displacement`, then order everything by displacement.
    fn gather(
        indices: &[usize],
        index: &[f64],
        objectives: &[Vec<f64>],
        to_displacement: impl Fn(f64) -> f64,
    ) -> Self {
        let raw: Vec<f64> = indices.iter().map(|&i| to_displacement(index[i])).collect();
        let order = stable_order(&raw);
        Half {
            displacement: order.iter().map(|&k| raw[k]).collect(),
            objectives: objectives
                .iter()
                .map(|col| order.iter().map(|&k| col[indices[k]]).collect())
                .collect(),
        }
    }

    /// Interpolate objective `k` of this half onto `grid`.
    fn sample(&self, k: usize, grid: &[f64]) -> Vec<f64> {
        interp_onto(grid, &self.displacement, &self.objectives[k])
    }
}

/// Split `dataset` around `neutral_point` into symmetric and antisymmetric
/// parts. Returns `(symmetric, antisymmetric)`.
///
/// Rows below the neutral point are reflected onto the positive axis so both
/// halves are indexed by displacement `|index − neutral_point|`. Rows exactly
/// at the neutral point belong to neither half. Each half is interpolated
/// onto the union of both displacement sets, holding flat beyond its own
/// range, and combined per grid point as
///
/// ```text
/// symmetric     = (above + below) / 2
/// antisymmetric = (above − below) / 2
/// ```
///
/// Both outputs carry `index_column` (the displacement grid) followed by one
/// float column per objective, named `<objective>sym` / `<objective>antisym`.
pub fn symmetrize(
    dataset: &Dataset,
    index_column: &str,
    objective_columns: &[&str],
    neutral_point: f64,
) -> Result<(Dataset, Dataset)> {
    symmetrize_with(
        dataset,
        index_column,
        objective_columns,
        &SymmetrizeOptions::around(neutral_point),
    )
}

/// [`symmetrize`] driven by a [`SymmetrizeOptions`].
pub fn symmetrize_with(
    dataset: &Dataset,
    index_column: &str,
    objective_columns: &[&str],
    options: &SymmetrizeOptions,
) -> Result<(Dataset, Dataset)> {
    options.validate()?;
    if objective_columns.is_empty() {
        return Err(AlignError::NoObjectiveColumns);
    }

    let index = dataset.numeric_column_of(index_column, "input")?;
    let objectives = objective_columns
        .iter()
        .map(|c| dataset.numeric_column_of(c, "input"))
        .collect::<Result<Vec<_>>>()?;
    let sym_columns = output_columns(index_column, objective_columns, &options.sym_suffix)?;
    let antisym_columns = output_columns(index_column, objective_columns, &options.antisym_suffix)?;

    let p = options.neutral_point;
    let below = filtered_indices(&index, Threshold::Below(p));
    let above = filtered_indices(&index, Threshold::Above(p));
    for (rows, side) in [(&below, PartitionSide::Below), (&above, PartitionSide::Above)] {
        if rows.is_empty() {
            return Err(AlignError::EmptyPartition {
                column: index_column.to_string(),
                side,
                neutral_point: p,
            });
        }
    }

    let negative = Half::gather(&below, &index, &objectives, |x| p - x);
    let positive = Half::gather(&above, &index, &objectives, |x| x - p);
    let grid = union_grid(&negative.displacement, &positive.displacement);
    debug!(
        "symmetrize '{index_column}' around {p}: {} below, {} above, {} at the neutral point, grid of {}",
        below.len(),
        above.len(),
        index.len() - below.len() - above.len(),
        grid.len()
    );

    let mut sym_cols = Vec::with_capacity(objectives.len());
    let mut antisym_cols = Vec::with_capacity(objectives.len());
    for k in 0..objectives.len() {
        let pos = positive.sample(k, &grid);
        let neg = negative.sample(k, &grid);
        sym_cols.push(pos.iter().zip(&neg).map(|(a, b)| (a + b) / 2.0).collect::<Vec<_>>());
        antisym_cols.push(pos.iter().zip(&neg).map(|(a, b)| (a - b) / 2.0).collect::<Vec<_>>());
    }

    Ok((
        assemble(sym_columns, &grid, &sym_cols),
        assemble(antisym_columns, &grid, &antisym_cols),
    ))
}

fn output_columns(index_column: &str, objectives: &[&str], suffix: &str) -> Result<Vec<String>> {
    let mut columns = vec![index_column.to_string()];
    for obj in objectives {
        let name = format!("{obj}{suffix}");
        if columns.contains(&name) {
            return Err(AlignError::ColumnCollision(name));
        }
        columns.push(name);
    }
    Ok(columns)
}

fn assemble(columns: Vec<String>, grid: &[f64], values: &[Vec<f64>]) -> Dataset {
    let rows = grid
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            std::iter::once(Value::Float(x))
                .chain(values.iter().map(|col| Value::Float(col[i])))
                .collect()
        })
        .collect();
    Dataset::from_parts_unchecked(columns, rows)
}
