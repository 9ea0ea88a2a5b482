//! Generic symbolic element system `k * d = r`

use crate::error::{CondenseError, CondenseResult};
use crate::symbolic::{Expr, SymMatrix, Symbol};

/// Stiffness matrix, displacement and load vector of one element
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicSystem {
    k: SymMatrix,
    d: SymMatrix,
    r: SymMatrix,
}

impl SymbolicSystem {
    /// System of `size` degrees of freedom made of free unknowns
    ///
    /// `k[i, j]` and `k[j, i]` share the symbol `k{i}{j}`, loads are `r{i}`
    /// and displacements `d{i}`.
    pub fn generic(size: usize) -> CondenseResult<Self> {
        if size == 0 {
            return Err(CondenseError::InvalidSize(size));
        }

        let k = SymMatrix::from_fn(size, size, |i, j| Expr::symbol(Symbol::stiffness(i, j)));
        let d = SymMatrix::column((0..size).map(|i| Expr::symbol(Symbol::displacement(i))).collect());
        let r = SymMatrix::column((0..size).map(|i| Expr::symbol(Symbol::load(i))).collect());

        log::debug!(
            "Built generic system of size {} with {} unknowns",
            size,
            size * (size + 1) / 2 + 2 * size
        );
        Ok(Self { k, d, r })
    }

    /// System from matrices supplied by another derivation step
    ///
    /// `k` must be square and symmetric, `d` and `r` column vectors of
    /// matching length.
    pub fn from_parts(k: SymMatrix, d: SymMatrix, r: SymMatrix) -> CondenseResult<Self> {
        let size = k.nrows();
        if size == 0 {
            return Err(CondenseError::InvalidSize(size));
        }
        if !k.is_square() {
            return Err(CondenseError::DimensionMismatch(format!(
                "stiffness matrix must be square, got {}x{}",
                k.nrows(),
                k.ncols()
            )));
        }
        for (name, v) in [("displacement", &d), ("load", &r)] {
            if v.shape() != (size, 1) {
                return Err(CondenseError::DimensionMismatch(format!(
                    "{} vector must be {}x1, got {}x{}",
                    name,
                    size,
                    v.nrows(),
                    v.ncols()
                )));
            }
        }
        if let Some((i, j)) = k.asymmetry() {
            return Err(CondenseError::NotSymmetric(i, j));
        }
        Ok(Self { k, d, r })
    }

    /// Number of degrees of freedom
    pub fn size(&self) -> usize {
        self.k.nrows()
    }

    pub fn stiffness(&self) -> &SymMatrix {
        &self.k
    }

    pub fn displacements(&self) -> &SymMatrix {
        &self.d
    }

    pub fn loads(&self) -> &SymMatrix {
        &self.r
    }

    pub(crate) fn from_parts_unchecked(k: SymMatrix, d: SymMatrix, r: SymMatrix) -> Self {
        Self { k, d, r }
    }
}
