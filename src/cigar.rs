//! Run-length encoded edit scripts.

use crate::{prelude::*, traceback::Step, CostModel, Direction};
use serde::{Deserialize, Serialize};
use std::{fmt, slice};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CigarOp {
    Match,
    Sub,
    Ins,
    Del,
}

impl CigarOp {
    pub fn to_char(&self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Sub => 'X',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        }
    }

    /// The offset in the DP matrix of one operation.
    pub fn delta(&self) -> Pos {
        match self {
            CigarOp::Match | CigarOp::Sub => Pos(1, 1),
            CigarOp::Ins => Pos(0, 1),
            CigarOp::Del => Pos(1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CigarElem {
    pub op: CigarOp,
    pub cnt: I,
}

#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cigar {
    pub ops: Vec<CigarElem>,
}

impl Cigar {
    pub fn push(&mut self, op: CigarOp) {
        self.push_elem(CigarElem { op, cnt: 1 });
    }

    pub fn push_elem(&mut self, elem: CigarElem) {
        if elem.cnt == 0 {
            return;
        }
        if let Some(s) = self.ops.last_mut() {
            if s.op == elem.op {
                s.cnt += elem.cnt;
                return;
            }
        }
        self.ops.push(elem);
    }

    /// Append the operation of a traceback step.
    /// A diagonal step of cost 0 is a match.
    pub fn push_step(&mut self, step: &Step) {
        self.push(match step.dir {
            Direction::Diag if step.cost == 0 => CigarOp::Match,
            Direction::Diag => CigarOp::Sub,
            Direction::Up => CigarOp::Del,
            Direction::Left => CigarOp::Ins,
        });
    }

    /// The total number of operations.
    pub fn len(&self) -> I {
        self.ops.iter().map(|e| e.cnt).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn to_path(&self) -> Path {
        let mut pos = Pos(0, 0);
        let mut path = vec![pos];
        for el in &self.ops {
            let Pos(di, dj) = el.op.delta();
            for _ in 0..el.cnt {
                pos = Pos(pos.0 + di, pos.1 + dj);
                path.push(pos);
            }
        }
        path
    }

    /// Recompute the cost of the cigar under `cm`.
    ///
    /// Returns `None` when the cigar does not fit `a` and `b`: it runs past the
    /// end of either sequence, stops early, or a match (substitution) is
    /// placed on a pair that the cost model charges (does not charge) for.
    pub fn verify<T, C: CostModel<T>>(&self, cm: &C, a: &[T], b: &[T]) -> Option<Cost> {
        let mut pos = Pos(0, 0);
        let mut cost = 0;
        for &CigarElem { op, cnt } in self {
            for _ in 0..cnt {
                match op {
                    CigarOp::Match | CigarOp::Sub => {
                        let (x, y) = (a.get(pos.0)?, b.get(pos.1)?);
                        let sub = cm.sub_cost(x, y, pos.0 + 1, pos.1 + 1);
                        if (sub == 0) != (op == CigarOp::Match) {
                            return None;
                        }
                        cost = sub.saturating_add(cost);
                        pos = Pos(pos.0 + 1, pos.1 + 1);
                    }
                    CigarOp::Ins => {
                        b.get(pos.1)?;
                        cost = cm.ins_cost().saturating_add(cost);
                        pos.1 += 1;
                    }
                    CigarOp::Del => {
                        a.get(pos.0)?;
                        cost = cm.del_cost().saturating_add(cost);
                        pos.0 += 1;
                    }
                }
            }
        }
        (pos == Pos(a.len(), b.len())).then_some(cost)
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.ops {
            write!(f, "{}{}", elem.cnt, elem.op.to_char())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Cigar {
    type Item = &'a CigarElem;

    type IntoIter = slice::Iter<'a, CigarElem>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
