//! Splitting a reordered system into hinge and retained blocks

use super::builder::SymbolicSystem;
use crate::error::{CondenseError, CondenseResult};
use crate::symbolic::SymMatrix;

/// Blocks of a system whose first `n` DOFs are the hinges
///
/// Index 1 is the hinge block, index 2 the retained block.
#[derive(Debug, Clone)]
pub struct Partition {
    pub k11: SymMatrix,
    pub k12: SymMatrix,
    pub k21: SymMatrix,
    pub k22: SymMatrix,
    pub r1: SymMatrix,
    pub r2: SymMatrix,
    pub d1: SymMatrix,
    pub d2: SymMatrix,
}

impl Partition {
    /// Split at row/column `n`, leaving at least one retained DOF
    pub fn split(system: &SymbolicSystem, n: usize) -> CondenseResult<Self> {
        let size = system.size();
        if n >= size {
            return Err(CondenseError::NoRetainedDofs(size));
        }
        let k = system.stiffness();
        let (r, d) = (system.loads(), system.displacements());

        Ok(Self {
            k11: k.block(0..n, 0..n),
            k12: k.block(0..n, n..size),
            k21: k.block(n..size, 0..n),
            k22: k.block(n..size, n..size),
            r1: r.block(0..n, 0..1),
            r2: r.block(n..size, 0..1),
            d1: d.block(0..n, 0..1),
            d2: d.block(n..size, 0..1),
        })
    }

    /// Number of hinged DOFs
    pub fn hinge_count(&self) -> usize {
        self.k11.nrows()
    }

    /// Number of retained DOFs
    pub fn retained_count(&self) -> usize {
        self.k22.nrows()
    }
}
