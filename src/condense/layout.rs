//! Hinge validation and the hinges-first DOF permutation

use std::fmt;

use super::builder::SymbolicSystem;
use crate::error::{CondenseError, CondenseResult};
use crate::symbolic::SymMatrix;

/// Validated set of hinged DOF indices
///
/// Indices are strictly ascending and below the system size, and at least
/// one DOF is left unhinged. Out-of-order input is rejected, never sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HingeSet {
    indices: Vec<usize>,
    size: usize,
}

impl HingeSet {
    pub fn new(indices: Vec<usize>, size: usize) -> CondenseResult<Self> {
        if size == 0 {
            return Err(CondenseError::InvalidSize(size));
        }
        if let Some(i) = indices.windows(2).position(|pair| pair[1] <= pair[0]) {
            if indices[i + 1] == indices[i] {
                return Err(CondenseError::DuplicateHinge(indices[i]));
            }
            return Err(CondenseError::UnsortedHinges(indices));
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= size) {
            return Err(CondenseError::HingeOutOfRange { index, size });
        }
        if indices.len() == size {
            return Err(CondenseError::NoRetainedDofs(size));
        }
        Ok(Self { indices, size })
    }

    /// No hinges at all; condensation is then the identity
    pub fn empty(size: usize) -> CondenseResult<Self> {
        Self::new(Vec::new(), size)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of hinged DOFs
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Size of the system the hinges refer to
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Unhinged indices in ascending order
    pub fn retained(&self) -> Vec<usize> {
        (0..self.size).filter(|&i| !self.contains(i)).collect()
    }
}

impl fmt::Display for HingeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.indices)
    }
}

/// Permutation placing hinge DOFs first
///
/// `order[p]` is the original index at reordered position `p`,
/// `inverse[i]` the reordered position of original index `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofLayout {
    order: Vec<usize>,
    inverse: Vec<usize>,
}

impl DofLayout {
    /// Hinges in the given order followed by the remaining DOFs
    pub fn new(hinges: &HingeSet) -> Self {
        let order: Vec<usize> = hinges
            .indices()
            .iter()
            .copied()
            .chain(hinges.retained())
            .collect();
        Self::from_order(order)
    }

    fn from_order(order: Vec<usize>) -> Self {
        let mut inverse = vec![0; order.len()];
        for (position, &original) in order.iter().enumerate() {
            inverse[original] = position;
        }
        Self { order, inverse }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    pub fn size(&self) -> usize {
        self.order.len()
    }

    /// `P^T * k * P`: entry `(p, q)` is `k[order[p], order[q]]`
    fn reorder_matrix(&self, k: &SymMatrix) -> SymMatrix {
        k.select(&self.order, &self.order)
    }

    /// `P^T * v`: entry `p` is `v[order[p]]`
    fn reorder_vector(&self, v: &SymMatrix) -> SymMatrix {
        v.select(&self.order, &[0])
    }

    /// Inverse of [`DofLayout::reorder_matrix`]
    fn restore_matrix(&self, k: &SymMatrix) -> SymMatrix {
        k.select(&self.inverse, &self.inverse)
    }

    /// Inverse of [`DofLayout::reorder_vector`]
    fn restore_vector(&self, v: &SymMatrix) -> SymMatrix {
        v.select(&self.inverse, &[0])
    }

    /// Apply the permutation to a whole system of the layout's size
    pub fn reorder(&self, system: &SymbolicSystem) -> CondenseResult<SymbolicSystem> {
        self.check_system(system)?;
        Ok(SymbolicSystem::from_parts_unchecked(
            self.reorder_matrix(system.stiffness()),
            self.reorder_vector(system.displacements()),
            self.reorder_vector(system.loads()),
        ))
    }

    /// Undo [`DofLayout::reorder`]
    pub fn unreorder(&self, system: &SymbolicSystem) -> CondenseResult<SymbolicSystem> {
        self.check_system(system)?;
        Ok(SymbolicSystem::from_parts_unchecked(
            self.restore_matrix(system.stiffness()),
            self.restore_vector(system.displacements()),
            self.restore_vector(system.loads()),
        ))
    }

    fn check_system(&self, system: &SymbolicSystem) -> CondenseResult<()> {
        if system.size() != self.size() {
            return Err(CondenseError::DimensionMismatch(format!(
                "layout permutes {} DOFs, got a system of size {}",
                self.size(),
                system.size()
            )));
        }
        Ok(())
    }
}

/// Reorder `system` so that the hinges come first
pub fn reorder(system: &SymbolicSystem, hinges: &HingeSet) -> CondenseResult<SymbolicSystem> {
    DofLayout::new(hinges).reorder(system)
}

/// Inverse of [`reorder`] for the same hinge set
pub fn unreorder(system: &SymbolicSystem, hinges: &HingeSet) -> CondenseResult<SymbolicSystem> {
    DofLayout::new(hinges).unreorder(system)
}

pub(crate) fn check_size(system: &SymbolicSystem, hinges: &HingeSet) -> CondenseResult<()> {
    if system.size() != hinges.size() {
        return Err(CondenseError::DimensionMismatch(format!(
            "hinges refer to a system of size {}, got size {}",
            hinges.size(),
            system.size()
        )));
    }
    Ok(())
}
