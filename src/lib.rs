//!
//! # pairwise-dp
//!
//! Weighted edit distance and Needleman-Wunsch global alignment.
//!
//! Both algorithms fill the same `(|a|+1) x (|b|+1)` DP matrix and optionally
//! trace back one optimal path through it. The crate can be used in a few ways:
//! - Call `compute_distance`, `compute_alignment` or `compute_edit_script` with a cost model.
//! - Create a reusable `NW` aligner object owning a cost model.
//! - Build a `CostMatrix` directly and walk it with a `Traceback`.
//!
//! Insertions consume a character of `b` only, deletions consume a character
//! of `a` only.
//!
//! ```
//! use pairwise_dp::*;
//!
//! let cm = LinearCost::default();
//! assert_eq!(compute_distance(b"kitten", b"sitting", &cm).unwrap(), 5);
//!
//! let alignment = compute_alignment(b"BBADCBA", b"BAADDCABDDA", &cm).unwrap();
//! assert_eq!(alignment.cost, 6);
//! ```

mod error;
#[cfg(test)]
mod tests;

pub mod cigar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cost_model;
#[cfg(any(test, feature = "cli"))]
pub mod generate;
pub mod matrix;
pub mod nw;
pub mod render;
pub mod traceback;

pub use cigar::{Cigar, CigarElem, CigarOp};
pub use cost_model::{CostModel, LinearCost, MatchCondition};
pub use error::{AlignError, Result};
pub use matrix::CostMatrix;
pub use nw::NW;
pub use traceback::{Alignment, Direction, EditOp, Step, Traceback};

/// Type for storing costs. Signed, so that negative costs returned by a
/// faulty cost model can be detected.
pub type Cost = i32;

/// Type for indices into sequences and the DP matrix.
pub type I = usize;

/// A cell of the DP matrix: `Pos(i, j)` corresponds to the prefixes `a[..i]` and `b[..j]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos(pub I, pub I);

/// A path through the DP matrix, from `Pos(0, 0)` to `Pos(|a|, |b|)`.
pub type Path = Vec<Pos>;

/// An owned byte sequence.
pub type Sequence = Vec<u8>;
/// A byte sequence slice.
pub type Seq<'a> = &'a [u8];

pub mod prelude {
    pub use rustc_hash::FxHashSet as HashSet;
    pub use std::cmp::{max, min};

    pub use crate::{Cost, Path, Pos, Seq, Sequence, I};
}

/// Pretty print a byte sequence.
pub fn to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}

/// Pretty print a single byte, the same way `to_string` prints it on its own.
/// Non-ASCII bytes are shown as `U+FFFD`.
pub fn byte_char(c: u8) -> char {
    if c.is_ascii() {
        c as char
    } else {
        char::REPLACEMENT_CHARACTER
    }
}

/// The optimal cost of transforming `a` into `b` under `cm`.
///
/// Only two rows of the matrix are kept in memory.
pub fn compute_distance<T, C: CostModel<T>>(a: &[T], b: &[T], cm: &C) -> Result<Cost> {
    matrix::cost_only(a, b, cm)
}

/// One optimal global alignment of `a` and `b` under `cm`.
///
/// Ties are broken by preferring diagonal steps over deletions over insertions.
pub fn compute_alignment<T: Clone, C: CostModel<T>>(
    a: &[T],
    b: &[T],
    cm: &C,
) -> Result<Alignment<T>> {
    let matrix = CostMatrix::build(a, b, cm)?;
    traceback::alignment(&matrix, a, b, cm)
}

/// One optimal sequence of edit operations transforming `a` into `b` under `cm`.
pub fn compute_edit_script<T: Clone, C: CostModel<T>>(
    a: &[T],
    b: &[T],
    cm: &C,
) -> Result<Vec<EditOp<T>>> {
    let matrix = CostMatrix::build(a, b, cm)?;
    traceback::edit_script(&matrix, a, b, cm)
}

/// `compute_distance` using the default cost model: match 0, mismatch 2, insertion 1, deletion 1.
pub fn distance<T: PartialEq>(a: &[T], b: &[T]) -> Cost {
    // The default cost model is non-negative, so this cannot fail.
    match compute_distance(a, b, &LinearCost::default()) {
        Ok(cost) => cost,
        Err(e) => unreachable!("default cost model rejected: {e}"),
    }
}

/// `compute_alignment` using the default cost model.
pub fn align<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Alignment<T> {
    match compute_alignment(a, b, &LinearCost::default()) {
        Ok(alignment) => alignment,
        Err(e) => unreachable!("default cost model rejected: {e}"),
    }
}
