use crate::{Cost, Pos};
use thiserror::Error;

/// Errors reported while building or tracing back a DP matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// The cost model returned a negative cost.
    #[error("invalid cost model: {op} cost {cost} is negative{}", at(.pos))]
    InvalidCostModel {
        op: &'static str,
        cost: Cost,
        /// The cell at which the cost was queried, if any.
        pos: Option<Pos>,
    },

    /// No predecessor explains the cost stored in a cell.
    /// The matrix was built with a different cost model, or is malformed.
    #[error("inconsistent cost model: no predecessor of ({}, {}) explains cost {cost}", .pos.0, .pos.1)]
    InconsistentCostModel { pos: Pos, cost: Cost },

    /// The matrix does not have the shape implied by the two sequences.
    #[error("matrix of {rows}x{cols} cells does not fit sequences of length {len_a} and {len_b}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        len_a: usize,
        len_b: usize,
    },
}

fn at(pos: &Option<Pos>) -> String {
    match pos {
        Some(Pos(i, j)) => format!(" at ({i}, {j})"),
        None => String::new(),
    }
}

impl AlignError {
    pub(crate) fn invalid(op: &'static str, cost: Cost, pos: Option<Pos>) -> Self {
        Self::InvalidCostModel { op, cost, pos }
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = AlignError::invalid("insertion", -1, None);
        assert_eq!(
            e.to_string(),
            "invalid cost model: insertion cost -1 is negative"
        );
        let e = AlignError::invalid("substitution", -3, Some(Pos(2, 4)));
        assert_eq!(
            e.to_string(),
            "invalid cost model: substitution cost -3 is negative at (2, 4)"
        );
        let e = AlignError::InconsistentCostModel {
            pos: Pos(1, 2),
            cost: 3,
        };
        assert_eq!(
            e.to_string(),
            "inconsistent cost model: no predecessor of (1, 2) explains cost 3"
        );
    }
}
