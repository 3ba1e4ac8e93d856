//! Ruge-Stueben interpolation-operator construction
//!
//! The prolongation matrix P maps coarse-level corrections to fine-level
//! updates. It is built in passes over the operator matrix A:
//!
//! 1. The **direct pass** commits a row for every coarse node (identity onto
//!    its coarse column), every isolated node (empty row) and every fine
//!    node with at least one strong coarse neighbor (weighted
//!    interpolation).
//! 2. **Indirect passes** resolve the remaining nodes by composing their
//!    connections with the already-committed rows of their neighbors,
//!    repeating until every node has a row or a pass makes no progress.
//!
//! Both passes share the same per-row statistics: positive off-diagonal
//! entries are folded into the diagonal (only negative couplings represent
//! diffusion-like connections), and the most negative off-diagonal entry
//! sets the strength barrier `theta * dmax`.

pub mod accumulator;
pub mod direct;
pub mod indirect;

pub use accumulator::CoarseAccumulator;

use crate::classify::{Coarsening, NodeState};
use crate::config::{DegeneracyPolicy, InterpolationConfig};
use crate::error::{Error, Result};
use crate::matrix::{ProlongationBuilder, SparseMatrixCSR};

/// Per-row quantities shared by the direct and indirect passes
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowStats {
    /// Diagonal entry with all positive off-diagonal entries folded in
    pub diag: f64,
    /// Most negative off-diagonal entry (0 if the row has none)
    pub dmax: f64,
    /// Sum of all negative off-diagonal entries
    pub sum_negative: f64,
}

pub(crate) fn row_stats(a: &SparseMatrixCSR<f64>, i: usize) -> RowStats {
    let mut diag = a.diagonal(i);
    let mut dmax = 0.0;
    let mut sum_negative = 0.0;

    for (_, value) in a.off_diag_iter(i) {
        if value > 0.0 {
            diag += value;
        } else {
            sum_negative += value;
            if value < dmax {
                dmax = value;
            }
        }
    }

    RowStats {
        diag,
        dmax,
        sum_negative,
    }
}

/// An interpolatory row after row-sum scaling
#[derive(Debug)]
pub(crate) struct ScaledRow {
    pub entries: Vec<(usize, f64)>,
    /// True if the row was committed unscaled under
    /// [`DegeneracyPolicy::Record`]
    pub suspect: bool,
}

/// Scale the interpolatory entries so the row satisfies the row-sum
/// condition: alpha = -(sum_neighbors / sum_interpolatory) / diag
///
/// A zero interpolatory sum leaves alpha undefined; the configured policy
/// decides between a hard error and committing the row unscaled.
pub(crate) fn scale_interpolatory(
    mut entries: Vec<(usize, f64)>,
    sum_neighbors: f64,
    diag: f64,
    node: usize,
    policy: DegeneracyPolicy,
) -> Result<ScaledRow> {
    let sum_interpolatory: f64 = entries.iter().map(|&(_, weight)| weight).sum();

    if sum_interpolatory == 0.0 {
        return match policy {
            DegeneracyPolicy::Error => Err(Error::NumericDegeneracy { node }),
            DegeneracyPolicy::Record => Ok(ScaledRow {
                entries,
                suspect: true,
            }),
        };
    }

    let alpha = -(sum_neighbors / sum_interpolatory) / diag;
    for (_, weight) in &mut entries {
        *weight *= alpha;
    }

    Ok(ScaledRow {
        entries,
        suspect: false,
    })
}

/// Outcome of the direct pass for a single row
pub(crate) enum RowOutcome {
    /// Coarse node: identity onto the given coarse column
    Identity(usize),
    /// Isolated node: empty row
    Empty,
    /// Fine node with a scaled interpolation row
    Interpolated(ScaledRow),
    /// No strong coarse neighbor; left for the indirect passes
    Unassigned,
}

/// The result of prolongation construction
#[derive(Debug)]
pub struct Prolongation {
    /// The N × C prolongation matrix
    pub matrix: SparseMatrixCSR<f64>,
    /// Final per-node states: `Coarse` or `Assigned { pass }` for every node
    pub states: Vec<NodeState>,
    /// Number of passes run (1 if the direct pass resolved everything)
    pub passes: u32,
    /// Rows committed unscaled under [`DegeneracyPolicy::Record`]
    pub suspect_rows: Vec<usize>,
}

/// Build the Ruge-Stueben prolongation operator for `a` under the given
/// coarse/fine splitting
///
/// Runs the direct pass, then indirect passes until every non-isolated node
/// has an interpolation row.
///
/// # Arguments
///
/// * `a` - The operator matrix on this level (square, CSR)
/// * `coarsening` - Coarse/fine classification and coarse renumbering
/// * `config` - Strength threshold and degeneracy policy
///
/// # Errors
///
/// * [`Error::InvalidTheta`] if the threshold is outside (0, 1]
/// * [`Error::Stall`] if a set of fine nodes has no path to any coarse node
/// * [`Error::NumericDegeneracy`] under [`DegeneracyPolicy::Error`]
///
/// # Panics
///
/// Panics if `a` is not square or the classification length does not match
/// the row count.
pub fn build_prolongation(
    a: &SparseMatrixCSR<f64>,
    coarsening: &Coarsening,
    config: &InterpolationConfig,
) -> Result<Prolongation> {
    config.validate()?;
    assert_eq!(a.n_rows, a.n_cols, "Operator matrix must be square");
    assert_eq!(
        a.n_rows,
        coarsening.len(),
        "Classification length must match the matrix row count"
    );

    let mut states = coarsening.states().to_vec();
    let mut builder = ProlongationBuilder::new(a.n_rows, coarsening.n_coarse());
    let mut suspect_rows = Vec::new();

    let unassigned = direct::build_direct_rows(
        a,
        coarsening,
        &mut states,
        &mut builder,
        config,
        &mut suspect_rows,
    )?;

    let passes = if unassigned > 0 {
        indirect::resolve_indirect_rows(
            a,
            &mut states,
            &mut builder,
            unassigned,
            config,
            &mut suspect_rows,
        )?
    } else {
        1
    };

    Ok(Prolongation {
        matrix: builder.finalize(),
        states,
        passes,
        suspect_rows,
    })
}
