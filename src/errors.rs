//! Error types produced while building, loading or solving trusses.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::truss::{BeamId, JointId};

/// Error returned when the joints and beams do not describe a valid truss.
///
/// # Examples
///
/// ```
/// use trusseq::{force, point, BeamId, JointId, Support, TopologyError, TrussBuilder};
///
/// let mut builder = TrussBuilder::new();
/// builder
///     .add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)
///     .expect("joint accepted");
/// builder
///     .add_beam(BeamId(1), JointId(1), JointId(7))
///     .expect("endpoints are checked when the incidence is built");
/// let error = builder.build().expect_err("joint 7 is missing");
/// assert_eq!(
///     error,
///     TopologyError::UnknownJoint { beam: BeamId(1), joint: JointId(7) }
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TopologyError {
    /// Returned when a beam names a joint that was never added.
    #[error("beam {beam} references joint {joint}, which does not exist")]
    UnknownJoint {
        /// The offending beam.
        beam: BeamId,
        /// The missing endpoint.
        joint: JointId,
    },
    /// Returned when both endpoints of a beam are the same joint.
    #[error("beam {beam} must connect two distinct joints (both ends are joint {joint})")]
    DegenerateBeam {
        /// The offending beam.
        beam: BeamId,
        /// The joint named twice.
        joint: JointId,
    },
    /// Returned when the two endpoints of a beam coincide in space.
    #[error("beam {0} has zero length")]
    ZeroLengthBeam(BeamId),
    /// Returned when a joint id is added twice.
    #[error("joint {0} is defined more than once")]
    DuplicateJoint(JointId),
    /// Returned when a beam id is added twice.
    #[error("beam {0} is defined more than once")]
    DuplicateBeam(BeamId),
    /// Returned for the reserved id `0`; ids must be positive.
    #[error("ids must be positive integers (received 0 for a {0})")]
    ZeroId(&'static str),
    /// Returned when a joint position or load is NaN or infinite.
    #[error("joint {0} has a non-finite position or load")]
    NonFiniteJoint(JointId),
}

/// Error returned when the number of unknowns differs from the number of equations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DeterminacyError {
    /// Fewer unknowns than equations: the truss is a mechanism.
    #[error(
        "truss is under-determined ({unknowns} unknowns for {equations} equations); \
         geometry not suitable for static equilibrium analysis"
    )]
    Underdetermined {
        /// Beam forces plus reaction components.
        unknowns: usize,
        /// Two equilibrium equations per joint.
        equations: usize,
    },
    /// More unknowns than equations: the truss is statically indeterminate.
    #[error(
        "truss is over-determined ({unknowns} unknowns for {equations} equations); \
         geometry not suitable for static equilibrium analysis"
    )]
    Overdetermined {
        /// Beam forces plus reaction components.
        unknowns: usize,
        /// Two equilibrium equations per joint.
        equations: usize,
    },
}

/// Error returned when the assembled equilibrium system cannot be solved reliably.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SingularSystemError {
    /// Returned when the coefficient matrix is not square.
    #[error("equilibrium matrix is {rows}x{columns}; a square system is required")]
    NotSquare {
        /// Number of equations.
        rows: usize,
        /// Number of unknowns.
        columns: usize,
    },
    /// Returned when the matrix is singular or too badly conditioned to trust.
    #[error(
        "cannot solve the linear system, unstable truss? \
         (reciprocal condition number {reciprocal_condition:.3e})"
    )]
    RankDeficient {
        /// Estimated 1-norm reciprocal condition number, zero when the
        /// factorisation found the matrix structurally singular.
        reciprocal_condition: f64,
    },
    /// Returned when the sparse matrix cannot be handed to the factorisation.
    #[error("cannot factorise the equilibrium matrix: {0}")]
    Factorisation(String),
    /// Returned when the computed solution does not satisfy the equations.
    #[error("cannot solve the linear system, unstable truss? (relative residual {residual:.3e})")]
    Unstable {
        /// Relative residual of the rejected solution, NaN when it was not finite.
        residual: f64,
    },
}

/// Error returned when a truss analysis fails.
///
/// Each pipeline stage contributes one variant so callers can tell the
/// failures apart without inspecting messages.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// The joints and beams are inconsistent.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// The unknown and equation counts differ.
    #[error(transparent)]
    Determinacy(#[from] DeterminacyError),
    /// The equilibrium system is singular.
    #[error(transparent)]
    SingularSystem(#[from] SingularSystemError),
}

/// Error returned while reading joints and beams files.
#[derive(Debug, Error)]
pub enum InputError {
    /// Returned when a file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Returned when a row cannot be parsed.
    #[error("{source_name}:{line}: {message}")]
    Parse {
        /// File name, or a placeholder when parsing in-memory text.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },
    /// Returned when the parsed rows do not form a valid truss.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Error returned while reading solver options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the options file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Options file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Returned when the options file is not valid JSON for [`SolverOptions`](crate::SolverOptions).
    #[error("invalid solver options: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when a tolerance is negative or not finite.
    #[error("solver option `{name}` must be a finite, non-negative number (received {value})")]
    InvalidTolerance {
        /// Name of the option.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
