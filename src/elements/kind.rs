//! Closed set of supported element kinds

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CondenseError, CondenseResult};

/// Element families whose local stiffness systems can be condensed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Plane truss bar, axial DOFs only
    Truss2d,
    /// Euler-Bernoulli beam, deflection and rotation at each end
    Beam2d,
    /// Plane frame, axial + beam DOFs at each end
    Frame2d,
    /// Space truss bar in local coordinates
    Truss3d,
    /// Space frame member, six DOFs per node
    Beam3d,
}

const TRUSS_LABELS: [&str; 2] = ["u_i", "u_j"];
const BEAM2D_LABELS: [&str; 4] = ["w_i", "phi_i", "w_j", "phi_j"];
const FRAME2D_LABELS: [&str; 6] = ["u_i", "w_i", "phi_i", "u_j", "w_j", "phi_j"];
const BEAM3D_LABELS: [&str; 12] = [
    "ux_i", "uy_i", "uz_i", "rx_i", "ry_i", "rz_i", "ux_j", "uy_j", "uz_j", "rx_j", "ry_j",
    "rz_j",
];

impl ElementKind {
    pub fn all() -> [ElementKind; 5] {
        [
            ElementKind::Truss2d,
            ElementKind::Beam2d,
            ElementKind::Frame2d,
            ElementKind::Truss3d,
            ElementKind::Beam3d,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Truss2d => "truss2d",
            ElementKind::Beam2d => "beam2d",
            ElementKind::Frame2d => "frame2d",
            ElementKind::Truss3d => "truss3d",
            ElementKind::Beam3d => "beam3d",
        }
    }

    /// Size of the local stiffness system
    pub fn dof_count(self) -> usize {
        self.dof_labels().len()
    }

    /// Name of every local DOF, in matrix order
    pub fn dof_labels(self) -> &'static [&'static str] {
        match self {
            ElementKind::Truss2d | ElementKind::Truss3d => &TRUSS_LABELS,
            ElementKind::Beam2d => &BEAM2D_LABELS,
            ElementKind::Frame2d => &FRAME2D_LABELS,
            ElementKind::Beam3d => &BEAM3D_LABELS,
        }
    }

    pub fn dof_label(self, index: usize) -> Option<&'static str> {
        self.dof_labels().get(index).copied()
    }

    /// DOFs per node
    pub fn dofs_per_node(self) -> usize {
        self.dof_count() / 2
    }

    /// Whether the DOF at `index` is a rotation
    pub fn is_rotation(self, index: usize) -> bool {
        match self {
            ElementKind::Truss2d | ElementKind::Truss3d => false,
            ElementKind::Beam2d => index % 2 == 1,
            ElementKind::Frame2d => index % 3 == 2,
            ElementKind::Beam3d => index % 6 >= 3,
        }
    }

    /// Check that a system of `size` DOFs belongs to this element
    pub fn check_size(self, size: usize) -> CondenseResult<()> {
        if size == self.dof_count() {
            Ok(())
        } else {
            Err(CondenseError::ElementSizeMismatch {
                element: self.name().to_string(),
                expected: self.dof_count(),
                size,
            })
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
