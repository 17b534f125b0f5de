#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod config;
pub mod determinacy;
pub mod equilibrium;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod report;
pub mod solution;
pub mod solver;
pub mod truss;

pub use analysis::{analyse, evaluate};
pub use config::SolverOptions;
pub use determinacy::Determinacy;
pub use equilibrium::{assemble, EquilibriumSystem, UnknownLayout};
pub use errors::{
    AnalysisError, ConfigError, DeterminacyError, InputError, SingularSystemError, TopologyError,
};
pub use geometry::{force, point, Force, Point};
pub use input::{load_truss, parse_truss};
pub use report::{render_forces, render_reactions};
pub use solution::Solution;
pub use solver::solve;
pub use truss::{BeamId, Joint, JointId, Support, Truss, TrussBuilder};
