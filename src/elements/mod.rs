//! Element catalog
//!
//! Each element kind fixes the size of its local stiffness system and the
//! meaning of every DOF, so hinge indices can be checked and reported by name.

mod kind;
mod releases;

pub use kind::ElementKind;
pub use releases::{ElementEnd, EndReleases};
