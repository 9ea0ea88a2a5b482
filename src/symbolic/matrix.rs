//! Immutable symbolic matrices

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use nalgebra::DMatrix;

use super::expr::Expr;
use crate::error::{CondenseError, CondenseResult};

/// Largest block the Laplace expansion handles (column sets are bitmasks)
const MAX_DETERMINANT_ORDER: usize = 63;

/// A dense matrix of symbolic expressions
///
/// Every operation returns a new matrix. Column vectors are `n x 1`
/// matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct SymMatrix {
    data: DMatrix<Expr>,
}

impl SymMatrix {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: DMatrix::from_element(nrows, ncols, Expr::zero()),
        }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { Expr::one() } else { Expr::zero() })
    }

    pub fn from_fn<F>(nrows: usize, ncols: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> Expr,
    {
        Self {
            data: DMatrix::from_fn(nrows, ncols, f),
        }
    }

    /// Column vector from its entries
    pub fn column(entries: Vec<Expr>) -> Self {
        let n = entries.len();
        Self {
            data: DMatrix::from_vec(n, 1, entries),
        }
    }

    /// Matrix from row-major rows; all rows must have equal length
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> CondenseResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != ncols) {
            return Err(CondenseError::DimensionMismatch(format!(
                "row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                ncols
            )));
        }
        let flat: Vec<Expr> = rows.into_iter().flatten().collect();
        Ok(Self {
            data: DMatrix::from_row_slice(nrows, ncols, &flat),
        })
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> &Expr {
        &self.data[(row, col)]
    }

    /// Entry `i` of a column vector
    pub fn entry(&self, i: usize) -> &Expr {
        &self.data[(i, 0)]
    }

    /// First index pair `(i, j)` with `self[i, j] != self[j, i]`
    pub fn asymmetry(&self) -> Option<(usize, usize)> {
        (0..self.nrows())
            .flat_map(|i| (i + 1..self.ncols()).map(move |j| (i, j)))
            .find(|&(i, j)| self.get(i, j) != self.get(j, i))
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_square() && self.asymmetry().is_none()
    }

    pub fn is_zero_row(&self, row: usize) -> bool {
        (0..self.ncols()).all(|j| self.get(row, j).is_zero())
    }

    pub fn is_zero_column(&self, col: usize) -> bool {
        (0..self.nrows()).all(|i| self.get(i, col).is_zero())
    }

    pub fn transpose(&self) -> SymMatrix {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &SymMatrix) -> CondenseResult<SymMatrix> {
        if self.ncols() != other.nrows() {
            return Err(CondenseError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.nrows(),
                self.ncols(),
                other.nrows(),
                other.ncols()
            )));
        }
        Ok(Self::from_fn(self.nrows(), other.ncols(), |i, j| {
            (0..self.ncols()).fold(Expr::zero(), |acc, k| {
                let a = self.get(i, k);
                let b = other.get(k, j);
                if a.is_zero() || b.is_zero() {
                    acc
                } else {
                    &acc + &(a * b)
                }
            })
        }))
    }

    pub fn subtract(&self, other: &SymMatrix) -> CondenseResult<SymMatrix> {
        self.check_same_shape(other, "subtract")?;
        Ok(Self::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.get(i, j) - other.get(i, j)
        }))
    }

    /// Entry-wise simplification
    pub fn simplify(&self) -> SymMatrix {
        Self::from_fn(self.nrows(), self.ncols(), |i, j| self.get(i, j).simplify())
    }

    /// Determinant by Laplace expansion
    pub fn determinant(&self) -> CondenseResult<Expr> {
        self.check_square("determinant")?;
        let all: Vec<usize> = (0..self.nrows()).collect();
        Ok(self.minor_determinant(&all, &all))
    }

    /// Inverse as adjugate over determinant
    ///
    /// All entries share the single denominator `det(self)`, which keeps
    /// the products formed during elimination small.
    pub fn invert(&self) -> CondenseResult<SymMatrix> {
        self.check_square("invert")?;
        let n = self.nrows();
        let det = self.determinant()?;
        log::debug!(
            "Inverting {}x{} block, determinant has {} terms",
            n,
            n,
            det.numerator().term_count()
        );
        let det_inv = det.recip().ok_or(CondenseError::SingularHingeBlock)?;

        let indices: Vec<usize> = (0..n).collect();
        let mut cofactors = HashMap::with_capacity(n * n);
        for i in 0..n {
            let rows: Vec<usize> = indices.iter().copied().filter(|&r| r != i).collect();
            for j in 0..n {
                let cols: Vec<usize> = indices.iter().copied().filter(|&c| c != j).collect();
                let minor = self.minor_determinant(&rows, &cols);
                let cofactor = if (i + j) % 2 == 0 { minor } else { -minor };
                cofactors.insert((i, j), cofactor);
            }
        }

        // inverse[i, j] = cofactor[j, i] / det
        Ok(Self::from_fn(n, n, |i, j| &cofactors[&(j, i)] * &det_inv))
    }

    /// Rectangular block over the given row and column ranges
    pub fn block(&self, rows: Range<usize>, cols: Range<usize>) -> SymMatrix {
        let (r0, c0) = (rows.start, cols.start);
        Self::from_fn(rows.len(), cols.len(), |i, j| self.get(r0 + i, c0 + j).clone())
    }

    /// Matrix formed from the given rows and columns, in the given order
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> SymMatrix {
        Self::from_fn(rows.len(), cols.len(), |i, j| self.get(rows[i], cols[j]).clone())
    }

    /// New matrix with a zero row inserted before row `at`
    pub fn insert_zero_row(&self, at: usize) -> SymMatrix {
        Self::from_fn(self.nrows() + 1, self.ncols(), |i, j| match i.cmp(&at) {
            std::cmp::Ordering::Less => self.get(i, j).clone(),
            std::cmp::Ordering::Equal => Expr::zero(),
            std::cmp::Ordering::Greater => self.get(i - 1, j).clone(),
        })
    }

    /// New matrix with a zero column inserted before column `at`
    pub fn insert_zero_column(&self, at: usize) -> SymMatrix {
        Self::from_fn(self.nrows(), self.ncols() + 1, |i, j| match j.cmp(&at) {
            std::cmp::Ordering::Less => self.get(i, j).clone(),
            std::cmp::Ordering::Equal => Expr::zero(),
            std::cmp::Ordering::Greater => self.get(i, j - 1).clone(),
        })
    }

    /// New matrix with entry `(row, col)` replaced
    pub fn with_entry(&self, row: usize, col: usize, value: Expr) -> SymMatrix {
        let mut data = self.data.clone();
        data[(row, col)] = value;
        Self { data }
    }

    /// Entries in row-major order with their indices
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &Expr)> {
        (0..self.nrows()).flat_map(move |i| (0..self.ncols()).map(move |j| (i, j, self.get(i, j))))
    }

    /// Upper triangle including the diagonal, row by row
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, &Expr)> {
        self.entries().filter(|&(i, j, _)| j >= i)
    }

    fn minor_determinant(&self, rows: &[usize], cols: &[usize]) -> Expr {
        debug_assert_eq!(rows.len(), cols.len());
        if rows.is_empty() {
            return Expr::one();
        }
        let mut memo = HashMap::new();
        let full = (1u64 << cols.len()) - 1;
        self.laplace(rows, cols, full, &mut memo)
    }

    /// Expands along `rows[depth]` where depth is the number of columns
    /// already consumed; the remaining columns are the set bits of `mask`.
    fn laplace(&self, rows: &[usize], cols: &[usize], mask: u64, memo: &mut HashMap<u64, Expr>) -> Expr {
        if mask == 0 {
            return Expr::one();
        }
        if let Some(cached) = memo.get(&mask) {
            return cached.clone();
        }

        let depth = cols.len() - mask.count_ones() as usize;
        let row = rows[depth];
        let mut acc = Expr::zero();
        let mut positive = true;
        for (k, &col) in cols.iter().enumerate() {
            if mask & (1u64 << k) == 0 {
                continue;
            }
            let entry = self.get(row, col);
            if !entry.is_zero() {
                let sub = self.laplace(rows, cols, mask & !(1u64 << k), memo);
                let term = entry * &sub;
                acc = if positive { &acc + &term } else { &acc - &term };
            }
            positive = !positive;
        }

        memo.insert(mask, acc.clone());
        acc
    }

    fn check_square(&self, op: &str) -> CondenseResult<()> {
        if !self.is_square() {
            return Err(CondenseError::DimensionMismatch(format!(
                "{} requires a square matrix, got {}x{}",
                op,
                self.nrows(),
                self.ncols()
            )));
        }
        if self.nrows() > MAX_DETERMINANT_ORDER {
            return Err(CondenseError::InvalidInput(format!(
                "{} supports at most {} rows, got {}",
                op,
                MAX_DETERMINANT_ORDER,
                self.nrows()
            )));
        }
        Ok(())
    }

    fn check_same_shape(&self, other: &SymMatrix, op: &str) -> CondenseResult<()> {
        if self.shape() != other.shape() {
            return Err(CondenseError::DimensionMismatch(format!(
                "cannot {} {}x{} and {}x{}",
                op,
                self.nrows(),
                self.ncols(),
                other.nrows(),
                other.ncols()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SymMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            write!(f, "[")?;
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.get(i, j))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
