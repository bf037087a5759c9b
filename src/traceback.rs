//! Recover one optimal path from a filled `CostMatrix`.
//!
//! The traceback starts in the bottom-right cell and repeatedly moves to a
//! parent that explains the cost of the current cell. When multiple parents
//! do, they are tried in the order `Diag`, `Up`, `Left`.

use crate::{byte_char, prelude::*, AlignError, Cigar, CostMatrix, CostModel, Result};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// The gap character used when printing alignments.
pub const GAP: char = '-';

/// The parent a cell was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// From `(i-1, j-1)`: match or substitution.
    Diag,
    /// From `(i-1, j)`: deletion of `a[i-1]`.
    Up,
    /// From `(i, j-1)`: insertion of `b[j-1]`.
    Left,
}

impl Direction {
    /// The parent of `pos` in this direction.
    #[inline]
    pub fn parent(&self, Pos(i, j): Pos) -> Pos {
        match self {
            Direction::Diag => Pos(i - 1, j - 1),
            Direction::Up => Pos(i - 1, j),
            Direction::Left => Pos(i, j - 1),
        }
    }
}

/// A single edit operation, carrying the symbols involved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp<T> {
    /// `a` is aligned to `b` at no cost.
    Match(T, T),
    /// `a` is replaced by `b`.
    Substitute(T, T),
    /// `b` is inserted.
    Insert(T),
    /// `a` is deleted.
    Delete(T),
}

impl<T> EditOp<T> {
    pub fn direction(&self) -> Direction {
        match self {
            EditOp::Match(..) | EditOp::Substitute(..) => Direction::Diag,
            EditOp::Insert(_) => Direction::Left,
            EditOp::Delete(_) => Direction::Up,
        }
    }
}

/// One traceback step: leave `pos` towards its parent in direction `dir`,
/// over an edge of cost `cost`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub pos: Pos,
    pub dir: Direction,
    pub cost: Cost,
}

impl Step {
    pub fn parent(&self) -> Pos {
        self.dir.parent(self.pos)
    }

    /// The edit operation corresponding to this step.
    /// A diagonal step of cost 0 is a match, otherwise it is a substitution.
    pub fn edit_op<T: Clone>(&self, a: &[T], b: &[T]) -> EditOp<T> {
        let Pos(i, j) = self.pos;
        match self.dir {
            Direction::Diag if self.cost == 0 => EditOp::Match(a[i - 1].clone(), b[j - 1].clone()),
            Direction::Diag => EditOp::Substitute(a[i - 1].clone(), b[j - 1].clone()),
            Direction::Up => EditOp::Delete(a[i - 1].clone()),
            Direction::Left => EditOp::Insert(b[j - 1].clone()),
        }
    }
}

/// Lazy traceback from the end of the matrix to `Pos(0, 0)`.
///
/// Steps are yielded in reverse order, i.e. starting at the end of the sequences.
/// After an error is yielded, the iterator is exhausted.
pub struct Traceback<'a, T, C> {
    m: &'a CostMatrix,
    a: &'a [T],
    b: &'a [T],
    cm: &'a C,
    pos: Pos,
    failed: bool,
}

impl<'a, T, C: CostModel<T>> Traceback<'a, T, C> {
    /// Fails when `m` does not have the shape `(|a|+1) x (|b|+1)`, or when
    /// `cm` has negative indel costs.
    pub fn new(m: &'a CostMatrix, a: &'a [T], b: &'a [T], cm: &'a C) -> Result<Self> {
        m.check_shape(a.len(), b.len())?;
        cm.validate()?;
        Ok(Traceback {
            m,
            a,
            b,
            cm,
            pos: m.end(),
            failed: false,
        })
    }

    /// The cell the next step leaves from.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    fn step(&self) -> Result<Step> {
        let m = self.m;
        let pos @ Pos(i, j) = self.pos;
        let cost = m[pos];
        if i > 0 && j > 0 {
            let sub = self.cm.sub_cost(&self.a[i - 1], &self.b[j - 1], i, j);
            if sub < 0 {
                return Err(AlignError::invalid("substitution", sub, Some(pos)));
            }
            if cost == m[Pos(i - 1, j - 1)].saturating_add(sub) {
                return Ok(Step {
                    pos,
                    dir: Direction::Diag,
                    cost: sub,
                });
            }
        }
        if i > 0 {
            let del = self.cm.del_cost();
            if cost == m[Pos(i - 1, j)].saturating_add(del) {
                return Ok(Step {
                    pos,
                    dir: Direction::Up,
                    cost: del,
                });
            }
        }
        if j > 0 {
            let ins = self.cm.ins_cost();
            if cost == m[Pos(i, j - 1)].saturating_add(ins) {
                return Ok(Step {
                    pos,
                    dir: Direction::Left,
                    cost: ins,
                });
            }
        }
        Err(AlignError::InconsistentCostModel { pos, cost })
    }
}

impl<'a, T, C: CostModel<T>> Iterator for Traceback<'a, T, C> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.pos == Pos(0, 0) {
            let cost = self.m[self.pos];
            if cost == 0 {
                return None;
            }
            // The origin of a valid matrix is 0.
            self.failed = true;
            return Some(Err(AlignError::InconsistentCostModel {
                pos: self.pos,
                cost,
            }));
        }
        match self.step() {
            Ok(step) => {
                log::trace!("{:?} -> {:?} ({:?})", step.pos, step.parent(), step.dir);
                self.pos = step.parent();
                Some(Ok(step))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, T, C: CostModel<T>> FusedIterator for Traceback<'a, T, C> {}

/// A complete traceback, ordered from `Pos(0, 0)` to the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub cost: Cost,
    pub steps: Vec<Step>,
}

impl Trace {
    /// The cells visited, starting at `Pos(0, 0)`.
    pub fn path(&self) -> Path {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        path.push(Pos(0, 0));
        path.extend(self.steps.iter().map(|s| s.pos));
        path
    }

    pub fn cigar(&self) -> Cigar {
        let mut cigar = Cigar::default();
        for step in &self.steps {
            cigar.push_step(step);
        }
        cigar
    }

    pub fn edit_script<T: Clone>(&self, a: &[T], b: &[T]) -> Vec<EditOp<T>> {
        self.steps.iter().map(|s| s.edit_op(a, b)).collect()
    }

    /// The two gapped rows of the alignment. `None` marks a gap.
    pub fn alignment<T: Clone>(&self, a: &[T], b: &[T]) -> Alignment<T> {
        let mut source = Vec::with_capacity(self.steps.len());
        let mut target = Vec::with_capacity(self.steps.len());
        for &Step { pos: Pos(i, j), dir, .. } in &self.steps {
            let (x, y) = match dir {
                Direction::Diag => (Some(a[i - 1].clone()), Some(b[j - 1].clone())),
                Direction::Up => (Some(a[i - 1].clone()), None),
                Direction::Left => (None, Some(b[j - 1].clone())),
            };
            source.push(x);
            target.push(y);
        }
        Alignment {
            cost: self.cost,
            source,
            target,
        }
    }
}

/// Walk the full traceback and return it in forward order.
pub fn reconstruct<T, C: CostModel<T>>(
    m: &CostMatrix,
    a: &[T],
    b: &[T],
    cm: &C,
) -> Result<Trace> {
    let mut steps = Traceback::new(m, a, b, cm)?.collect::<Result<Vec<_>>>()?;
    steps.reverse();
    log::debug!("Traceback of cost {} has {} steps", m.cost(), steps.len());
    Ok(Trace {
        cost: m.cost(),
        steps,
    })
}

pub fn edit_script<T: Clone, C: CostModel<T>>(
    m: &CostMatrix,
    a: &[T],
    b: &[T],
    cm: &C,
) -> Result<Vec<EditOp<T>>> {
    Ok(reconstruct(m, a, b, cm)?.edit_script(a, b))
}

pub fn alignment<T: Clone, C: CostModel<T>>(
    m: &CostMatrix,
    a: &[T],
    b: &[T],
    cm: &C,
) -> Result<Alignment<T>> {
    Ok(reconstruct(m, a, b, cm)?.alignment(a, b))
}

/// Apply an edit script to `a`.
///
/// Returns `None` when the script does not fit `a`: a match, substitution or
/// deletion names a symbol other than the next one of `a`, or the script ends
/// before `a` does.
pub fn apply<T: PartialEq + Clone>(a: &[T], script: &[EditOp<T>]) -> Option<Vec<T>> {
    let mut rest = a.iter();
    let mut out = Vec::with_capacity(a.len());
    for op in script {
        match op {
            EditOp::Match(x, y) | EditOp::Substitute(x, y) => {
                if rest.next()? != x {
                    return None;
                }
                out.push(y.clone());
            }
            EditOp::Delete(x) => {
                if rest.next()? != x {
                    return None;
                }
            }
            EditOp::Insert(y) => out.push(y.clone()),
        }
    }
    if rest.next().is_some() {
        return None;
    }
    Some(out)
}

/// A global alignment: two rows of equal length, where `None` marks a gap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment<T> {
    pub cost: Cost,
    pub source: Vec<Option<T>>,
    pub target: Vec<Option<T>>,
}

impl<T> Alignment<T> {
    /// The number of columns.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (Option<&T>, Option<&T>)> + '_ {
        self.source
            .iter()
            .zip(&self.target)
            .map(|(x, y)| (x.as_ref(), y.as_ref()))
    }

    /// The source sequence with gaps removed.
    pub fn ungapped_source(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.source.iter().flatten().cloned().collect()
    }

    /// The target sequence with gaps removed.
    pub fn ungapped_target(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.target.iter().flatten().cloned().collect()
    }

    /// Print both rows, using `gap` for gaps.
    pub fn format_rows(&self, gap: char, f: impl Fn(&T) -> char) -> (String, String) {
        let row = |r: &[Option<T>]| r.iter().map(|x| x.as_ref().map_or(gap, &f)).collect();
        (row(&self.source[..]), row(&self.target[..]))
    }
}

impl Alignment<u8> {
    pub fn rows(&self) -> (String, String) {
        self.format_rows(GAP, |&c| byte_char(c))
    }
}

impl Alignment<char> {
    pub fn rows(&self) -> (String, String) {
        self.format_rows(GAP, |&c| c)
    }
}
