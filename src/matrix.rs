//! The `CostMatrix` of minimal prefix costs.
//!
//! `m[i][j]` is the minimal cost of transforming `a[..i]` into `b[..j]`:
//!
//! ```text
//! m[0][0] = 0
//! m[i][0] = i * del
//! m[0][j] = j * ins
//! m[i][j] = min(m[i-1][j-1] + sub(a[i-1], b[j-1]), m[i-1][j] + del, m[i][j-1] + ins)
//! ```
//!
//! Sums saturate at `Cost::MAX`.

use crate::{prelude::*, AlignError, CostModel, Result};
use std::ops::Index;

/// The full `(|a|+1) x (|b|+1)` DP matrix, stored row-major in a flat buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: I,
    cols: I,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Fill the matrix for `a` and `b`.
    ///
    /// Fails with `InvalidCostModel` when `cm` returns a negative cost anywhere.
    pub fn build<T, C: CostModel<T>>(a: &[T], b: &[T], cm: &C) -> Result<Self> {
        cm.validate()?;
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut cells = vec![0; rows * cols];
        first_row(&mut cells[..cols], cm.ins_cost());
        for (i, ca) in (1..rows).zip(a) {
            let (prev, cur) = cells[(i - 1) * cols..(i + 1) * cols].split_at_mut(cols);
            next_row(prev, cur, i, ca, b, cm)?;
        }
        let m = CostMatrix { rows, cols, cells };
        log::debug!(
            "Built {}x{} matrix with cost {}",
            m.rows,
            m.cols,
            m.cost()
        );
        Ok(m)
    }

    /// Wrap existing rows, e.g. a matrix computed elsewhere.
    /// Returns `None` for an empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(CostMatrix {
            rows: rows.len(),
            cols,
            cells: rows.concat(),
        })
    }

    /// The number of rows, `|a| + 1`.
    pub fn rows(&self) -> I {
        self.rows
    }

    /// The number of columns, `|b| + 1`.
    pub fn cols(&self) -> I {
        self.cols
    }

    #[inline]
    pub fn get(&self, Pos(i, j): Pos) -> Option<Cost> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: I) -> &[Cost] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cost]> + '_ {
        self.cells.chunks_exact(self.cols)
    }

    /// The optimal cost, stored in the bottom-right cell.
    pub fn cost(&self) -> Cost {
        self.cells[self.cells.len() - 1]
    }

    /// The cell where the traceback starts.
    pub fn end(&self) -> Pos {
        Pos(self.rows - 1, self.cols - 1)
    }

    pub(crate) fn check_shape(&self, len_a: I, len_b: I) -> Result<()> {
        if self.rows != len_a + 1 || self.cols != len_b + 1 {
            return Err(AlignError::MatrixShape {
                rows: self.rows,
                cols: self.cols,
                len_a,
                len_b,
            });
        }
        Ok(())
    }
}

impl Index<Pos> for CostMatrix {
    type Output = Cost;

    #[inline]
    fn index(&self, Pos(i, j): Pos) -> &Cost {
        assert!(j < self.cols, "column {j} out of bounds");
        &self.cells[i * self.cols + j]
    }
}

/// Compute only the optimal cost, keeping two rows in memory.
pub(crate) fn cost_only<T, C: CostModel<T>>(a: &[T], b: &[T], cm: &C) -> Result<Cost> {
    cm.validate()?;
    let mut prev = vec![0; b.len() + 1];
    let mut cur = vec![0; b.len() + 1];
    first_row(&mut prev, cm.ins_cost());
    for (i, ca) in (1..).zip(a) {
        next_row(&prev, &mut cur, i, ca, b, cm)?;
        std::mem::swap(&mut prev, &mut cur);
    }
    Ok(prev[b.len()])
}

fn first_row(row: &mut [Cost], ins: Cost) {
    for (j, c) in row.iter_mut().enumerate() {
        *c = (j as Cost).saturating_mul(ins);
    }
}

/// Fill row `i` from row `i-1`. `ca` is `a[i-1]`.
#[inline]
fn next_row<T, C: CostModel<T>>(
    prev: &[Cost],
    cur: &mut [Cost],
    i: I,
    ca: &T,
    b: &[T],
    cm: &C,
) -> Result<()> {
    let ins = cm.ins_cost();
    let del = cm.del_cost();
    cur[0] = prev[0].saturating_add(del);
    for (j, cb) in (1..).zip(b) {
        let sub = cm.sub_cost(ca, cb, i, j);
        if sub < 0 {
            return Err(AlignError::invalid("substitution", sub, Some(Pos(i, j))));
        }
        cur[j] = min(
            prev[j - 1].saturating_add(sub),
            min(prev[j].saturating_add(del), cur[j - 1].saturating_add(ins)),
        );
    }
    Ok(())
}
