//! The method-of-joints pipeline: determinacy check, assembly, solve, unpack.

use crate::config::SolverOptions;
use crate::determinacy;
use crate::equilibrium::assemble;
use crate::errors::AnalysisError;
use crate::solution::Solution;
use crate::solver::solve;
use crate::truss::{Truss, TrussBuilder};

/// Solve `truss` for its beam forces and support reactions.
///
/// The stages run strictly in order and the first failure ends the analysis;
/// no matrix is assembled for a truss that fails the determinacy check.
///
/// # Errors
///
/// Returns [`AnalysisError::Determinacy`] when the unknown and equation counts
/// differ and [`AnalysisError::SingularSystem`] when the equilibrium system
/// cannot be solved reliably.
pub fn evaluate(truss: &Truss, options: &SolverOptions) -> Result<Solution, AnalysisError> {
    determinacy::check(truss)?;
    let system = assemble(truss);
    let unknowns = solve(&system, options)?;
    log::info!(
        "solved {} beam forces and {} reactions",
        system.layout().beams().len(),
        system.layout().supports().len()
    );
    Ok(Solution::unpack(system.layout(), unknowns))
}

/// Build the truss collected by `builder` and solve it.
///
/// # Errors
///
/// Returns [`AnalysisError::Topology`] when the builder holds inconsistent
/// data, otherwise the errors of [`evaluate`].
pub fn analyse(
    builder: TrussBuilder,
    options: &SolverOptions,
) -> Result<(Truss, Solution), AnalysisError> {
    let truss = builder.build()?;
    let solution = evaluate(&truss, options)?;
    Ok((truss, solution))
}

impl Truss {
    /// Solve the truss with the default [`SolverOptions`].
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    ///
    /// # Examples
    /// ```
    /// use trusseq::{force, point, BeamId, JointId, Support, Truss};
    ///
    /// let mut builder = Truss::builder();
    /// builder.add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)?;
    /// builder.add_joint(JointId(2), point(4.0, 0.0), force(0.0, 0.0), Support::Pinned)?;
    /// builder.add_joint(JointId(3), point(2.0, 3.0), force(0.0, -10.0), Support::Free)?;
    /// builder.add_beam(BeamId(1), JointId(1), JointId(3))?;
    /// builder.add_beam(BeamId(2), JointId(2), JointId(3))?;
    /// let solution = builder.build()?.evaluate()?;
    ///
    /// // Both bars are in compression.
    /// let expected = -10.0 * 13.0_f64.sqrt() / 6.0;
    /// let actual = solution.beam_force(BeamId(1)).expect("beam 1 solved");
    /// assert!((actual - expected).abs() < 1e-9);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn evaluate(&self) -> Result<Solution, AnalysisError> {
        evaluate(self, &SolverOptions::default())
    }

    /// Solve the truss with explicit solver tolerances.
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    pub fn evaluate_with(&self, options: &SolverOptions) -> Result<Solution, AnalysisError> {
        evaluate(self, options)
    }
}
