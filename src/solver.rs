//! Sparse direct solution of the assembled equilibrium system.

use faer::prelude::SpSolver;
use faer::sparse::linalg::solvers::Lu;
use faer::sparse::SparseColMat;
use faer::Mat;
use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;

use crate::config::SolverOptions;
use crate::equilibrium::EquilibriumSystem;
use crate::errors::SingularSystemError;

/// Upper bound on the solve pairs spent estimating the inverse norm.
const CONDITION_ITERATIONS: usize = 5;

/// Solve `A x = b` for the raw unknowns of `system`.
///
/// The matrix is factorised with a sparse LU. Before the load is solved, the
/// factors give an estimate of the 1-norm reciprocal condition number, and the
/// system is rejected when it falls below
/// [`SolverOptions::min_reciprocal_condition`]. After the solve the solution
/// must be finite and its relative residual must not exceed
/// [`SolverOptions::residual_tolerance`].
///
/// # Errors
///
/// Returns [`SingularSystemError`] when the matrix is not square, singular or
/// numerically unstable.
pub fn solve(
    system: &EquilibriumSystem,
    options: &SolverOptions,
) -> Result<DVector<f64>, SingularSystemError> {
    let (rows, columns) = (system.rows(), system.columns());
    if rows != columns {
        return Err(SingularSystemError::NotSquare { rows, columns });
    }
    if rows == 0 {
        return Ok(DVector::zeros(0));
    }

    let triplets: Vec<(usize, usize, f64)> = system
        .matrix()
        .triplet_iter()
        .map(|(row, column, &value)| (row, column, value))
        .collect();
    let matrix = SparseColMat::<usize, f64>::try_new_from_triplets(rows, columns, &triplets)
        .map_err(|error| SingularSystemError::Factorisation(format!("{error:?}")))?;
    let lu = match matrix.sp_lu() {
        Ok(lu) => lu,
        Err(error) => {
            log::warn!("rejecting singular equilibrium system ({error:?})");
            return Err(SingularSystemError::RankDeficient {
                reciprocal_condition: 0.0,
            });
        }
    };

    let reciprocal_condition = reciprocal_condition(system.matrix(), &lu);
    log::debug!("reciprocal condition number {reciprocal_condition:.3e}");
    if !(reciprocal_condition > 0.0 && reciprocal_condition >= options.min_reciprocal_condition) {
        log::warn!("rejecting singular equilibrium system (rcond {reciprocal_condition:.3e})");
        return Err(SingularSystemError::RankDeficient {
            reciprocal_condition,
        });
    }

    let load = system.load();
    let x = lu.solve(&Mat::from_fn(rows, 1, |i, _| load[i]));
    let solution = DVector::from_fn(rows, |i, _| x.read(i, 0));
    if solution.iter().any(|value| !value.is_finite()) {
        log::warn!("rejecting non-finite solution of the equilibrium system");
        return Err(SingularSystemError::Unstable { residual: f64::NAN });
    }

    let residual = system.residual(&solution) / (1.0 + load.norm());
    log::debug!("relative residual {residual:.3e}");
    if !(residual <= options.residual_tolerance) {
        log::warn!("rejecting inaccurate solution (relative residual {residual:.3e})");
        return Err(SingularSystemError::Unstable { residual });
    }
    Ok(solution)
}

/// Estimate `1 / (‖A‖₁ ‖A⁻¹‖₁)` from the LU factors of `matrix`.
///
/// Zero when the matrix is zero or the factors yield non-finite values.
fn reciprocal_condition(matrix: &CsrMatrix<f64>, lu: &Lu<usize, f64>) -> f64 {
    let norm = one_norm(matrix);
    let inverse_norm = inverse_one_norm(lu, matrix.nrows());
    if norm > 0.0 && inverse_norm.is_finite() && inverse_norm > 0.0 {
        1.0 / (norm * inverse_norm)
    } else {
        0.0
    }
}

/// Largest absolute column sum.
fn one_norm(matrix: &CsrMatrix<f64>) -> f64 {
    let mut sums = vec![0.0_f64; matrix.ncols()];
    for (_, column, value) in matrix.triplet_iter() {
        sums[column] += value.abs();
    }
    sums.into_iter().fold(0.0, f64::max)
}

/// Lower bound on `‖A⁻¹‖₁` by Hager's method, using solves with `A` and `Aᵀ`.
fn inverse_one_norm(lu: &Lu<usize, f64>, n: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let mut probe = Mat::from_fn(n, 1, |_, _| 1.0 / n as f64);
    let mut estimate = 0.0;
    for _ in 0..CONDITION_ITERATIONS {
        let y = lu.solve(&probe);
        estimate = (0..n).map(|i| y.read(i, 0).abs()).sum::<f64>();
        if !estimate.is_finite() {
            return f64::INFINITY;
        }
        let signs = Mat::from_fn(n, 1, |i, _| if y.read(i, 0) < 0.0 { -1.0 } else { 1.0 });
        let z = lu.solve_transpose(&signs);
        let mut largest = (0, 0.0_f64);
        let mut projection = 0.0;
        for i in 0..n {
            let value: f64 = z.read(i, 0);
            if value.abs() > largest.1 {
                largest = (i, value.abs());
            }
            projection += value * probe.read(i, 0);
        }
        if largest.1 <= projection {
            break;
        }
        probe = Mat::from_fn(n, 1, |i, _| if i == largest.0 { 1.0 } else { 0.0 });
    }
    estimate
}
