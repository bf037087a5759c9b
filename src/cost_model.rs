//! This module contains the `CostModel` trait and the `LinearCost` cost model.

use crate::{AlignError, Cost, Result, I};
use serde::{Deserialize, Serialize};

/// A trait describing a cost model for symbols of type `T`.
///
/// Costs must be non-negative. The builder and traceback reject negative
/// costs with `AlignError::InvalidCostModel`.
pub trait CostModel<T> {
    /// The cost of aligning `a` against `b`, where `a = a_seq[i-1]` and
    /// `b = b_seq[j-1]`, i.e. `(i, j)` is the DP cell the diagonal edge enters.
    ///
    /// Returns 0 when the pair matches.
    fn sub_cost(&self, a: &T, b: &T, i: I, j: I) -> Cost;

    /// The cost of consuming one character of `b` only.
    fn ins_cost(&self) -> Cost;

    /// The cost of consuming one character of `a` only.
    fn del_cost(&self) -> Cost;

    /// Check the constant costs of the model.
    fn validate(&self) -> Result<()> {
        if self.ins_cost() < 0 {
            return Err(AlignError::invalid("insertion", self.ins_cost(), None));
        }
        if self.del_cost() < 0 {
            return Err(AlignError::invalid("deletion", self.del_cost(), None));
        }
        Ok(())
    }
}

impl<T, C: CostModel<T>> CostModel<T> for &C {
    #[inline]
    fn sub_cost(&self, a: &T, b: &T, i: I, j: I) -> Cost {
        (**self).sub_cost(a, b, i, j)
    }
    #[inline]
    fn ins_cost(&self) -> Cost {
        (**self).ins_cost()
    }
    #[inline]
    fn del_cost(&self) -> Cost {
        (**self).del_cost()
    }
    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

/// When a diagonal edge between two symbols counts as a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchCondition {
    /// The symbols are equal.
    #[default]
    Equal,
    /// The symbols are equal and `|i - j| < w`.
    Window(I),
}

impl MatchCondition {
    #[inline]
    pub fn holds(&self, equal: bool, i: I, j: I) -> bool {
        match *self {
            MatchCondition::Equal => equal,
            MatchCondition::Window(w) => equal && i.abs_diff(j) < w,
        }
    }
}

/// Linear costs: a fixed substitution, insertion and deletion cost.
/// Matches cost 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearCost {
    /// The substitution cost.
    pub sub: Cost,
    /// The insertion cost.
    pub ins: Cost,
    /// The deletion cost.
    pub del: Cost,
    #[serde(default)]
    pub matching: MatchCondition,
}

/// Substitutions cost as much as an insertion plus a deletion, so ties
/// between a substitution and an indel pair are broken by the traceback order.
impl Default for LinearCost {
    fn default() -> Self {
        Self::new(2, 1, 1)
    }
}

impl LinearCost {
    pub fn new(sub: Cost, ins: Cost, del: Cost) -> LinearCost {
        LinearCost {
            sub,
            ins,
            del,
            matching: MatchCondition::Equal,
        }
    }
    pub fn unit() -> LinearCost {
        Self::new(1, 1, 1)
    }
    pub fn linear(sub: Cost, indel: Cost) -> LinearCost {
        Self::new(sub, indel, indel)
    }
    pub fn linear_asymmetric(sub: Cost, ins: Cost, del: Cost) -> LinearCost {
        Self::new(sub, ins, del)
    }

    /// Only count equal symbols as a match when their positions differ by less than `w`.
    pub fn with_window(self, w: I) -> LinearCost {
        self.with_matching(MatchCondition::Window(w))
    }

    pub fn with_matching(self, matching: MatchCondition) -> LinearCost {
        LinearCost { matching, ..self }
    }

    /// Insertions and deletions cost the same. The mismatch cost does not
    /// depend on the symbols, so this implies `d(a, b) == d(b, a)`.
    pub fn is_symmetric(&self) -> bool {
        self.ins == self.del
    }
}

impl<T: PartialEq> CostModel<T> for LinearCost {
    #[inline]
    fn sub_cost(&self, a: &T, b: &T, i: I, j: I) -> Cost {
        if self.matching.holds(a == b, i, j) {
            0
        } else {
            self.sub
        }
    }

    #[inline]
    fn ins_cost(&self) -> Cost {
        self.ins
    }

    #[inline]
    fn del_cost(&self) -> Cost {
        self.del
    }

    fn validate(&self) -> Result<()> {
        if self.sub < 0 {
            return Err(AlignError::invalid("substitution", self.sub, None));
        }
        if self.ins < 0 {
            return Err(AlignError::invalid("insertion", self.ins, None));
        }
        if self.del < 0 {
            return Err(AlignError::invalid("deletion", self.del, None));
        }
        Ok(())
    }
}

/// A cost model with a custom substitution function and linear indel costs.
///
/// ```
/// use pairwise_dp::{compute_distance, cost_model::FnCost};
///
/// let sub = |a: &u8, b: &u8, _: usize, _: usize| {
///     if a.eq_ignore_ascii_case(b) { 0 } else { 2 }
/// };
/// let cm = FnCost::new(sub, 1, 1);
/// assert_eq!(compute_distance(b"Kitten", b"kITTEN", &cm).unwrap(), 0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnCost<F> {
    pub sub: F,
    pub ins: Cost,
    pub del: Cost,
}

impl<F> FnCost<F> {
    pub fn new(sub: F, ins: Cost, del: Cost) -> Self {
        FnCost { sub, ins, del }
    }
}

impl<T, F: Fn(&T, &T, I, I) -> Cost> CostModel<T> for FnCost<F> {
    #[inline]
    fn sub_cost(&self, a: &T, b: &T, i: I, j: I) -> Cost {
        (self.sub)(a, b, i, j)
    }
    #[inline]
    fn ins_cost(&self) -> Cost {
        self.ins
    }
    #[inline]
    fn del_cost(&self) -> Cost {
        self.del
    }
}
