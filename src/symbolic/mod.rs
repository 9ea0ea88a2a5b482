//! Small exact computer-algebra kernel
//!
//! Just enough algebra for static condensation: polynomials over the
//! rationals, rational expressions with factored denominators and dense
//! matrices of those expressions with explicit `multiply`, `transpose`,
//! `invert` and `simplify` operations.

mod expr;
mod matrix;
mod polynomial;
mod symbol;

pub use expr::Expr;
pub use matrix::SymMatrix;
pub use polynomial::{Monomial, Polynomial};
pub use symbol::{Symbol, SymbolKind};
