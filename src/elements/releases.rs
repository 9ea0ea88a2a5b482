//! End releases expressed as hinge sets

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::kind::ElementKind;
use crate::condense::HingeSet;
use crate::error::CondenseResult;

/// Element end at which a release acts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElementEnd {
    I,
    J,
    Both,
}

/// Moment releases at the ends of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndReleases {
    pub kind: ElementKind,
    pub i_node: bool,
    pub j_node: bool,
}

impl EndReleases {
    /// No releases
    pub fn none(kind: ElementKind) -> Self {
        Self {
            kind,
            i_node: false,
            j_node: false,
        }
    }

    /// Pin at the i-node
    pub fn pin_i(kind: ElementKind) -> Self {
        Self::at(kind, ElementEnd::I)
    }

    /// Pin at the j-node
    pub fn pin_j(kind: ElementKind) -> Self {
        Self::at(kind, ElementEnd::J)
    }

    /// Pins at both ends
    pub fn pin_both(kind: ElementKind) -> Self {
        Self::at(kind, ElementEnd::Both)
    }

    pub fn at(kind: ElementKind, end: ElementEnd) -> Self {
        Self {
            kind,
            i_node: matches!(end, ElementEnd::I | ElementEnd::Both),
            j_node: matches!(end, ElementEnd::J | ElementEnd::Both),
        }
    }

    /// Released rotational DOFs, ascending
    ///
    /// Trusses carry no rotations, so their releases are always empty.
    pub fn indices(&self) -> Vec<usize> {
        let per_node = self.kind.dofs_per_node();
        (0..self.kind.dof_count())
            .filter(|&index| self.kind.is_rotation(index))
            .filter(|&index| {
                if index < per_node {
                    self.i_node
                } else {
                    self.j_node
                }
            })
            .filter(|&index| self.kind != ElementKind::Beam3d || index % 6 != 3)
            .collect()
    }

    /// Released DOFs as a hinge set over the element's local system
    pub fn hinges(&self) -> CondenseResult<HingeSet> {
        HingeSet::new(self.indices(), self.kind.dof_count())
    }

    /// Labels of the released DOFs
    pub fn labels(&self) -> Vec<&'static str> {
        self.indices()
            .into_iter()
            .filter_map(|index| self.kind.dof_label(index))
            .collect()
    }
}
