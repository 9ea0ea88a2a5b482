//! FEA Condense - symbolic static condensation of finite element systems
//!
//! Derives closed-form stiffness matrices for elements with released
//! (hinged) degrees of freedom. A generic symmetric system is built from
//! free symbols, the hinge DOFs are eliminated exactly through a Schur
//! complement and the result is reported as pretty-printed matrices and
//! as `SetSym`/`SetVec` statements ready to paste into a numerical element.
//!
//! ## Example
//! ```rust
//! use fea_condense::prelude::*;
//!
//! let system = SymbolicSystem::generic(2).unwrap();
//! let hinges = HingeSet::new(vec![0], 2).unwrap();
//! let options = CondensationOptions::default().code_only();
//!
//! let condensation = condense(&system, &hinges, &options).unwrap();
//! let report = Report::new(&condensation, &options).render();
//!
//! assert!(report.contains("k.SetSym(1, 1, (k00*k11 - k01*k01)/k00)"));
//! ```

pub mod condense;
pub mod elements;
pub mod error;
pub mod options;
pub mod report;
pub mod symbolic;

// Re-export common types
pub mod prelude {
    pub use crate::condense::{condense, Condensation, HingeSet, SymbolicSystem};
    pub use crate::elements::{ElementEnd, ElementKind, EndReleases};
    pub use crate::error::{CondenseError, CondenseResult};
    pub use crate::options::CondensationOptions;
    pub use crate::report::Report;
    pub use crate::symbolic::{Expr, SymMatrix, Symbol};
}
