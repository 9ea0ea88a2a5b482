//! Static condensation of hinged degrees of freedom
//!
//! The pipeline runs build → reorder → partition → eliminate → reinsert:
//!
//! ```rust
//! use fea_condense::prelude::*;
//!
//! let system = SymbolicSystem::generic(4).unwrap();
//! let hinges = HingeSet::new(vec![0, 3], 4).unwrap();
//! let result = condense(&system, &hinges, &CondensationOptions::default()).unwrap();
//!
//! assert_eq!(result.reduced.k.shape(), (2, 2));
//! assert_eq!(result.full.k.shape(), (4, 4));
//! ```

mod builder;
mod engine;
mod layout;
mod partition;
mod reinsert;

pub use builder::SymbolicSystem;
pub use engine::{eliminate, Condensed};
pub use layout::{reorder, unreorder, DofLayout, HingeSet};
pub use partition::Partition;
pub use reinsert::{reinsert, ExpandedSystem};

use crate::error::CondenseResult;
use crate::options::CondensationOptions;

/// Everything derived by one condensation run
#[derive(Debug, Clone)]
pub struct Condensation {
    pub hinges: HingeSet,
    pub layout: DofLayout,
    /// System over the retained DOFs only
    pub reduced: Condensed,
    /// Reduced system expanded to the original layout
    pub full: ExpandedSystem,
}

impl Condensation {
    /// Number of degrees of freedom before condensation
    pub fn size(&self) -> usize {
        self.hinges.size()
    }
}

/// Statically condense `hinges` out of `system`
pub fn condense(
    system: &SymbolicSystem,
    hinges: &HingeSet,
    options: &CondensationOptions,
) -> CondenseResult<Condensation> {
    layout::check_size(system, hinges)?;
    log::info!(
        "Condensing system of size {} with hinges {}",
        system.size(),
        hinges
    );

    let layout = DofLayout::new(hinges);
    let reordered = layout.reorder(system)?;
    log::debug!("DOF order after reordering: {:?}", layout.order());

    let blocks = Partition::split(&reordered, hinges.len())?;
    let reduced = engine::eliminate(&blocks, options.simplify)?;
    log::info!(
        "Reduced stiffness is {}x{}",
        reduced.k.nrows(),
        reduced.k.ncols()
    );

    let full = reinsert::reinsert(&reduced, hinges, system.displacements())?;

    Ok(Condensation {
        hinges: hinges.clone(),
        layout,
        reduced,
        full,
    })
}
