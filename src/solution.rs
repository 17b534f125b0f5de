//! Solved beam forces and support reactions.

use std::collections::BTreeMap;

use nalgebra::DVector;

use crate::equilibrium::UnknownLayout;
use crate::geometry::Force;
use crate::truss::{BeamId, JointId};

/// Result of a successful solve.
///
/// Axial forces are reported with tension positive. In the equilibrium
/// equations a positive beam unknown pushes both of its joints apart, so each
/// force is the negated beam unknown. Reactions are the forces the supports
/// exert on their joints.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Axial force of every beam, tension positive.
    beam_forces: BTreeMap<BeamId, f64>,
    /// Reaction of every pinned joint.
    reactions: BTreeMap<JointId, Force>,
    /// Solution vector in the column order of the layout.
    unknowns: DVector<f64>,
}

impl Solution {
    /// Split a solution vector into beam forces and reactions.
    ///
    /// # Panics
    ///
    /// Panics when `unknowns` does not have one entry per column of `layout`.
    #[must_use]
    pub fn unpack(layout: &UnknownLayout, unknowns: DVector<f64>) -> Self {
        assert_eq!(unknowns.len(), layout.len(), "one value per unknown required");
        let beam_forces = layout
            .beams()
            .iter()
            .enumerate()
            .map(|(column, &beam)| (beam, -unknowns[column]))
            .collect();
        let offset = layout.beams().len();
        let reactions = layout
            .supports()
            .iter()
            .enumerate()
            .map(|(k, &joint)| {
                let column = offset + 2 * k;
                (joint, Force::new(unknowns[column], unknowns[column + 1]))
            })
            .collect();
        Self {
            beam_forces,
            reactions,
            unknowns,
        }
    }

    /// Axial force of `beam`, tension positive.
    #[must_use]
    pub fn beam_force(&self, beam: BeamId) -> Option<f64> {
        self.beam_forces.get(&beam).copied()
    }

    /// Reaction at the pinned joint `joint`.
    #[must_use]
    pub fn reaction(&self, joint: JointId) -> Option<Force> {
        self.reactions.get(&joint).copied()
    }

    /// Beam forces in ascending beam id order.
    #[must_use]
    pub fn beam_forces(&self) -> &BTreeMap<BeamId, f64> {
        &self.beam_forces
    }

    /// Reactions in ascending joint id order.
    #[must_use]
    pub fn reactions(&self) -> &BTreeMap<JointId, Force> {
        &self.reactions
    }

    /// Raw solution vector of the equilibrium system.
    #[must_use]
    pub fn unknowns(&self) -> &DVector<f64> {
        &self.unknowns
    }
}
