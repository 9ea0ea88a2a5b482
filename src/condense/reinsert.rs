//! Expanding a condensed system back to the original DOF layout

use super::engine::Condensed;
use super::layout::HingeSet;
use crate::error::{CondenseError, CondenseResult};
use crate::symbolic::SymMatrix;

/// Condensed system in the original `N x N` layout
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedSystem {
    /// Reduced stiffness with zero rows and columns at the hinges
    pub k: SymMatrix,
    /// Reduced loads with zeros at the hinges
    pub r: SymMatrix,
    /// Free displacements at retained DOFs, recovered expressions at hinges
    pub d: SymMatrix,
}

/// Insert zero rows/columns at the hinges and put the recovered hinge
/// displacements next to the original retained ones
///
/// Hinges are inserted in ascending order so that every insertion lands at
/// its final index.
pub fn reinsert(
    reduced: &Condensed,
    hinges: &HingeSet,
    displacements: &SymMatrix,
) -> CondenseResult<ExpandedSystem> {
    let size = hinges.size();
    let retained = size - hinges.len();
    if reduced.k.shape() != (retained, retained) || reduced.r.shape() != (retained, 1) {
        return Err(CondenseError::DimensionMismatch(format!(
            "reduced system is {}x{}, expected {} retained DOFs",
            reduced.k.nrows(),
            reduced.k.ncols(),
            retained
        )));
    }
    if displacements.shape() != (size, 1) || reduced.d_hinges.shape() != (hinges.len(), 1) {
        return Err(CondenseError::DimensionMismatch(format!(
            "expected {} displacements and {} hinge displacements",
            size,
            hinges.len()
        )));
    }

    let mut k = reduced.k.clone();
    let mut r = reduced.r.clone();
    let mut d = displacements.clone();

    for (position, &index) in hinges.indices().iter().enumerate() {
        k = k.insert_zero_row(index).insert_zero_column(index);
        r = r.insert_zero_row(index);
        d = d.with_entry(index, 0, reduced.d_hinges.entry(position).clone());
    }

    Ok(ExpandedSystem { k, r, d })
}
