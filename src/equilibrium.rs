//! Assembly of the method-of-joints equilibrium equations.
//!
//! Every joint contributes two rows, the x and y force balance. The unknowns
//! are laid out by [`UnknownLayout`]: beam forces first, then the x and y
//! reaction of every pinned joint.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::truss::{BeamId, JointId, Truss};

/// Column ordering of the unknowns in an [`EquilibriumSystem`].
///
/// Columns `0..beam_count` hold the beam forces in ascending beam id order.
/// The support joints follow in ascending joint id order with two columns each,
/// x reaction then y reaction. The solution vector of the system is only
/// meaningful together with this layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLayout {
    /// Beam ids, sorted ascending; the position is the column.
    beams: Vec<BeamId>,
    /// Support joint ids, sorted ascending; the position `k` owns columns
    /// `beams.len() + 2k` and `beams.len() + 2k + 1`.
    supports: Vec<JointId>,
}

impl UnknownLayout {
    /// Derive the layout of `truss`.
    #[must_use]
    pub fn of(truss: &Truss) -> Self {
        Self {
            beams: truss.beam_ids().collect(),
            supports: truss.supports().map(|joint| joint.id()).collect(),
        }
    }

    /// Total number of unknowns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beams.len() + 2 * self.supports.len()
    }

    /// Return `true` when there are no unknowns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Beam ids in column order.
    #[must_use]
    pub fn beams(&self) -> &[BeamId] {
        &self.beams
    }

    /// Support joint ids in column order.
    #[must_use]
    pub fn supports(&self) -> &[JointId] {
        &self.supports
    }

    /// Column holding the force of `beam`.
    #[must_use]
    pub fn beam_column(&self, beam: BeamId) -> Option<usize> {
        self.beams.binary_search(&beam).ok()
    }

    /// Columns holding the x and y reactions of the support `joint`.
    #[must_use]
    pub fn reaction_columns(&self, joint: JointId) -> Option<(usize, usize)> {
        let k = self.supports.binary_search(&joint).ok()?;
        let x = self.beams.len() + 2 * k;
        Some((x, x + 1))
    }
}

/// Sparse linear system `A x = b` for the equilibrium of every joint.
#[derive(Clone, Debug)]
pub struct EquilibriumSystem {
    /// Coefficients, `2 * joints` rows by `layout.len()` columns.
    matrix: CsrMatrix<f64>,
    /// Negated external loads, two entries per joint.
    load: DVector<f64>,
    /// Meaning of each column.
    layout: UnknownLayout,
}

impl EquilibriumSystem {
    /// Coefficient matrix.
    #[must_use]
    pub fn matrix(&self) -> &CsrMatrix<f64> {
        &self.matrix
    }

    /// Right-hand side.
    #[must_use]
    pub fn load(&self) -> &DVector<f64> {
        &self.load
    }

    /// Column layout of the unknowns.
    #[must_use]
    pub fn layout(&self) -> &UnknownLayout {
        &self.layout
    }

    /// Number of equations.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of unknowns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Entry `(row, column)` of the coefficient matrix, zero when not stored
    /// or out of bounds.
    #[must_use]
    pub fn coefficient(&self, row: usize, column: usize) -> f64 {
        self.matrix
            .get_entry(row, column)
            .map_or(0.0, |entry| entry.into_value())
    }

    /// Euclidean norm of `A x - b`.
    ///
    /// # Panics
    ///
    /// Panics when `x` does not have one entry per unknown.
    #[must_use]
    pub fn residual(&self, x: &DVector<f64>) -> f64 {
        assert_eq!(x.len(), self.columns(), "one value per unknown required");
        let mut product = -self.load.clone();
        for (row, column, value) in self.matrix.triplet_iter() {
            product[row] += value * x[column];
        }
        product.norm()
    }
}

/// Assemble the equilibrium equations of `truss`.
///
/// For a beam from endpoint A to endpoint B with unit direction `u` (A to B),
/// the x and y rows of joint B receive `u` and those of joint A receive `-u`.
/// Row `2r` and `2r + 1` belong to the joint of rank `r` by ascending id; the
/// load entries are the negated external load of that joint, and a pinned
/// joint has a unit coefficient in each of its two reaction columns.
///
/// Assembly only depends on the id ordering of the truss, so running it twice
/// yields bit-identical systems.
#[must_use]
pub fn assemble(truss: &Truss) -> EquilibriumSystem {
    let layout = UnknownLayout::of(truss);
    let rows = 2 * truss.joint_count();
    let mut coo = CooMatrix::new(rows, layout.len());
    let mut load = DVector::zeros(rows);

    for (rank, joint) in truss.joints().enumerate() {
        let row_x = 2 * rank;
        let row_y = row_x + 1;

        for &beam in joint.beams() {
            let column = layout
                .beam_column(beam)
                .expect("every incident beam has a column in the layout");
            let direction = truss
                .beam_direction(beam)
                .expect("every incident beam belongs to the truss");
            let (start, _) = truss
                .beam_endpoints(beam)
                .expect("every incident beam belongs to the truss");
            let sign = if joint.id() == start { -1.0 } else { 1.0 };
            push_nonzero(&mut coo, row_x, column, sign * direction.x);
            push_nonzero(&mut coo, row_y, column, sign * direction.y);
        }

        load.fixed_rows_mut::<2>(row_x)
            .copy_from(&-joint.load().to_vector());

        if let Some((column_x, column_y)) = layout.reaction_columns(joint.id()) {
            coo.push(row_x, column_x, 1.0);
            coo.push(row_y, column_y, 1.0);
        }
    }

    let matrix = CsrMatrix::from(&coo);
    log::debug!(
        "assembled {}x{} equilibrium system with {} stored coefficients",
        matrix.nrows(),
        matrix.ncols(),
        matrix.nnz()
    );
    EquilibriumSystem {
        matrix,
        load,
        layout,
    }
}

/// Store `value` unless it is exactly zero.
fn push_nonzero(coo: &mut CooMatrix<f64>, row: usize, column: usize, value: f64) {
    if value != 0.0 {
        coo.push(row, column, value);
    }
}
