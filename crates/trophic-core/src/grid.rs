//! Dense 2D grids and coordinate helpers.
//!
//! Every grid computation in the workspace is an explicit elementwise loop
//! over a [`Grid`]; there is no broadcasting. By convention the row index
//! runs over the tax axis and the column index over the productivity axis,
//! so `grid.get(tax_idx, prod_idx)` addresses one firm type.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ModelError};

/// Dense row-major 2D matrix of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Creates a grid of the given shape filled with zeros.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    /// Creates a grid by evaluating `f(row, col)` at every cell.
    pub fn from_fn(n_rows: usize, n_cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in 0..n_rows {
            for col in 0..n_cols {
                data.push(f(row, col));
            }
        }
        Self {
            n_rows,
            n_cols,
            data,
        }
    }

    /// Builds a grid from explicit rows, validating that they are rectangular.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ModelError::Grid(
                    ErrorInfo::new("ragged-rows", "rows have inconsistent lengths")
                        .with_context("row", idx.to_string())
                        .with_context("expected", n_cols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
        }
        Ok(Self {
            n_rows,
            n_cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns true when the grid has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    /// Returns the value at `(row, col)`.
    ///
    /// Panics when the index is out of bounds, as slice indexing does.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.n_rows && col < self.n_cols, "grid index out of bounds");
        self.data[row * self.n_cols + col]
    }

    /// Writes the value at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.n_rows && col < self.n_cols, "grid index out of bounds");
        self.data[row * self.n_cols + col] = value;
    }

    /// Sum of every cell.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Returns a copy with every cell multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Returns a copy with `f` applied to every cell.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two grids of identical shape cell by cell.
    ///
    /// Panics when the shapes differ; shapes are fixed at construction so a
    /// mismatch is a programming error, not a runtime condition.
    pub fn zip_map(&self, other: &Grid, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(
            (self.n_rows, self.n_cols),
            (other.n_rows, other.n_cols),
            "grid shape mismatch"
        );
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Iterates over `(row, col, value)` triples in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n_cols = self.n_cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &v)| (idx / n_cols, idx % n_cols, v))
    }

    /// Returns true when every cell holds a finite value.
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.n_rows && col < self.n_cols, "grid index out of bounds");
        &self.data[row * self.n_cols + col]
    }
}

/// Returns `n` evenly spaced points from `lo` to `hi` inclusive.
///
/// Both endpoints are exact: `out[0] == lo` and `out[n-1] == hi` bitwise,
/// regardless of rounding in the interior points. `n == 1` yields `[lo]`.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    let mut out: Vec<f64> = (0..n).map(|i| lo + step * i as f64).collect();
    out[0] = lo;
    out[n - 1] = hi;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(2, 3, |row, col| (row * 10 + col) as f64);
        assert_eq!(g.get(0, 2), 2.0);
        assert_eq!(g.get(1, 0), 10.0);
        assert_eq!(g[(1, 2)], 12.0);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.info().code, "ragged-rows");
    }

    #[test]
    fn zip_map_combines_cellwise() {
        let a = Grid::from_fn(2, 2, |r, c| (r + c) as f64);
        let b = Grid::from_fn(2, 2, |_, _| 2.0);
        let prod = a.zip_map(&b, |x, y| x * y);
        assert_eq!(prod.get(1, 1), 4.0);
        assert_eq!(prod.sum(), 8.0);
    }

    #[test]
    fn linspace_endpoints_are_exact() {
        let pts = linspace(0.2, 1.0, 100);
        assert_eq!(pts.len(), 100);
        assert_eq!(pts[0], 0.2);
        assert_eq!(pts[99], 1.0);
        let step = pts[1] - pts[0];
        for pair in pts.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn grid_roundtrips_through_json() {
        let g = Grid::from_fn(3, 3, |r, c| r as f64 - c as f64);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
