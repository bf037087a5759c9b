//! Needleman-Wunsch: fill the full DP matrix and trace back one optimal path.

use crate::{
    matrix, prelude::*, traceback::Trace, Alignment, Cigar, CostMatrix, CostModel, EditOp,
    LinearCost, Result,
};

/// A reusable aligner owning a cost model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NW<C> {
    pub cm: C,
}

impl<C> NW<C> {
    pub fn new(cm: C) -> Self {
        NW { cm }
    }

    /// The optimal cost, using linear memory.
    pub fn cost<T>(&self, a: &[T], b: &[T]) -> Result<Cost>
    where
        C: CostModel<T>,
    {
        matrix::cost_only(a, b, &self.cm)
    }

    /// The full DP matrix, e.g. for rendering.
    pub fn matrix<T>(&self, a: &[T], b: &[T]) -> Result<CostMatrix>
    where
        C: CostModel<T>,
    {
        CostMatrix::build(a, b, &self.cm)
    }

    /// The full DP matrix together with the traceback through it.
    pub fn trace<T>(&self, a: &[T], b: &[T]) -> Result<(CostMatrix, Trace)>
    where
        C: CostModel<T>,
    {
        let m = self.matrix(a, b)?;
        let trace = crate::traceback::reconstruct(&m, a, b, &self.cm)?;
        Ok((m, trace))
    }

    /// Cost, path, and cigar of an optimal alignment.
    pub fn align<T>(&self, a: &[T], b: &[T]) -> Result<(Cost, Path, Cigar)>
    where
        C: CostModel<T>,
    {
        let (_, trace) = self.trace(a, b)?;
        Ok((trace.cost, trace.path(), trace.cigar()))
    }

    pub fn alignment<T: Clone>(&self, a: &[T], b: &[T]) -> Result<Alignment<T>>
    where
        C: CostModel<T>,
    {
        Ok(self.trace(a, b)?.1.alignment(a, b))
    }

    pub fn edit_script<T: Clone>(&self, a: &[T], b: &[T]) -> Result<Vec<EditOp<T>>>
    where
        C: CostModel<T>,
    {
        Ok(self.trace(a, b)?.1.edit_script(a, b))
    }
}

impl NW<LinearCost> {
    /// Plain equality matches with the given linear costs.
    pub fn linear(sub: Cost, ins: Cost, del: Cost) -> Self {
        NW::new(LinearCost::linear_asymmetric(sub, ins, del))
    }
}
