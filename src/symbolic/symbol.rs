//! Symbol handles for the unknowns of an element system

use std::fmt;

/// Family a symbolic unknown belongs to
///
/// The declaration order is also the print order inside a monomial, so
/// stiffness terms lead (`k01*d1`, not `d1*k01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// Stiffness matrix entry `k{i}{j}`
    Stiffness,
    /// Load vector entry `r{i}`
    Load,
    /// Displacement vector entry `d{i}`
    Displacement,
}

impl SymbolKind {
    /// Single-letter prefix used when printing
    pub fn prefix(self) -> char {
        match self {
            SymbolKind::Stiffness => 'k',
            SymbolKind::Load => 'r',
            SymbolKind::Displacement => 'd',
        }
    }
}

/// A symbolic unknown
///
/// Symbols are plain values. Two symbols are the same unknown exactly when
/// kind and indices agree, there is no registry behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    row: usize,
    col: Option<usize>,
}

impl Symbol {
    /// Stiffness entry for the unordered pair `(i, j)`
    ///
    /// `stiffness(2, 1)` and `stiffness(1, 2)` are the same symbol.
    pub fn stiffness(i: usize, j: usize) -> Self {
        Self {
            kind: SymbolKind::Stiffness,
            row: i.min(j),
            col: Some(i.max(j)),
        }
    }

    /// Load vector entry `r{i}`
    pub fn load(i: usize) -> Self {
        Self {
            kind: SymbolKind::Load,
            row: i,
            col: None,
        }
    }

    /// Displacement vector entry `d{i}`
    pub fn displacement(i: usize) -> Self {
        Self {
            kind: SymbolKind::Displacement,
            row: i,
            col: None,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Row index (vector index for loads and displacements)
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index, only present for stiffness entries
    pub fn col(&self) -> Option<usize> {
        self.col
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.kind.prefix();
        match self.col {
            // k110 could be k1,10 or k11,0 otherwise
            Some(col) if self.row >= 10 || col >= 10 => write!(f, "{}{}_{}", prefix, self.row, col),
            Some(col) => write!(f, "{}{}{}", prefix, self.row, col),
            None => write!(f, "{}{}", prefix, self.row),
        }
    }
}
