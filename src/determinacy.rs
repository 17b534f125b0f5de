//! Static determinacy check performed before any matrix is assembled.

use std::cmp::Ordering;

use crate::errors::DeterminacyError;
use crate::truss::Truss;

/// Unknown and equation counts of a truss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Determinacy {
    /// Beam forces plus two reaction components per pinned joint.
    pub unknowns: usize,
    /// Two equilibrium equations (x and y) per joint.
    pub equations: usize,
}

impl Determinacy {
    /// Count the unknowns and equations of `truss`.
    #[must_use]
    pub fn of(truss: &Truss) -> Self {
        let reactions: usize = truss
            .joints()
            .map(|joint| joint.support().reaction_count())
            .sum();
        Self {
            unknowns: truss.beam_count() + reactions,
            equations: 2 * truss.joint_count(),
        }
    }

    /// Succeed when the counts match, otherwise report which way they differ.
    ///
    /// # Errors
    ///
    /// Returns [`DeterminacyError`] when `unknowns != equations`.
    pub fn require_determinate(self) -> Result<Self, DeterminacyError> {
        let Self {
            unknowns,
            equations,
        } = self;
        match unknowns.cmp(&equations) {
            Ordering::Equal => Ok(self),
            Ordering::Less => Err(DeterminacyError::Underdetermined {
                unknowns,
                equations,
            }),
            Ordering::Greater => Err(DeterminacyError::Overdetermined {
                unknowns,
                equations,
            }),
        }
    }
}

/// Check that the method of joints applies to `truss`.
///
/// # Errors
///
/// Returns [`DeterminacyError`] when the truss is under- or over-determined.
pub fn check(truss: &Truss) -> Result<Determinacy, DeterminacyError> {
    let counts = Determinacy::of(truss);
    log::debug!(
        "determinacy: {} unknowns, {} equations",
        counts.unknowns,
        counts.equations
    );
    counts.require_determinate()
}
