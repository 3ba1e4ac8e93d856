//! Direct Ruge-Stueben interpolation pass
//!
//! One sweep over all rows. Coarse nodes interpolate to themselves, isolated
//! nodes get empty rows, and every fine node with at least one strong
//! negative connection to a coarse node gets a weighted interpolation row.
//! Fine nodes without such a neighbor are handed to the indirect passes.

use log::debug;

use super::{row_stats, scale_interpolatory, RowOutcome};
use crate::classify::{Coarsening, NodeState};
use crate::config::InterpolationConfig;
use crate::error::Result;
use crate::matrix::{ProlongationBuilder, SparseMatrixCSR};

/// Compute the direct-pass outcome for a single row
///
/// Pure function of the matrix and the initial classification, so rows can
/// be evaluated independently (and in parallel).
pub(crate) fn direct_row(
    a: &SparseMatrixCSR<f64>,
    coarsening: &Coarsening,
    i: usize,
    config: &InterpolationConfig,
) -> Result<RowOutcome> {
    if let Some(coarse_col) = coarsening.coarse_index(i) {
        return Ok(RowOutcome::Identity(coarse_col));
    }
    if a.is_isolated(i) {
        // Boundary values need not be prolongated
        return Ok(RowOutcome::Empty);
    }
    if coarsening.states()[i] != NodeState::FineDirect {
        // Pre-marked for indirect interpolation (e.g. aggressive coarsening)
        return Ok(RowOutcome::Unassigned);
    }

    let stats = row_stats(a, i);
    let barrier = config.theta * stats.dmax;

    // Collect the strong negative connections to coarse neighbors,
    // w'_ij = a_ij for suitable j
    let mut entries = Vec::new();
    for (n, value) in a.off_diag_iter(i) {
        if value >= 0.0 {
            continue;
        }
        let Some(coarse_col) = coarsening.coarse_index(n) else {
            continue;
        };
        if value > barrier {
            // Weaker than the threshold
            continue;
        }
        entries.push((coarse_col, value));
    }

    if entries.is_empty() {
        return Ok(RowOutcome::Unassigned);
    }

    let scaled = scale_interpolatory(
        entries,
        stats.sum_negative,
        stats.diag,
        i,
        config.degeneracy,
    )?;
    Ok(RowOutcome::Interpolated(scaled))
}

/// Apply one row's outcome: commit the row and update the node state
///
/// Returns true if the node was left unassigned.
pub(crate) fn apply_direct_outcome(
    i: usize,
    outcome: RowOutcome,
    states: &mut [NodeState],
    builder: &mut ProlongationBuilder,
    suspect_rows: &mut Vec<usize>,
) -> bool {
    match outcome {
        RowOutcome::Identity(coarse_col) => {
            builder.commit_identity_row(i, coarse_col);
            false
        }
        RowOutcome::Empty => {
            builder.commit_empty_row(i);
            states[i] = NodeState::Assigned { pass: 1 };
            false
        }
        RowOutcome::Interpolated(scaled) => {
            if scaled.suspect {
                suspect_rows.push(i);
            }
            builder.commit_row(i, scaled.entries);
            states[i] = NodeState::Assigned { pass: 1 };
            false
        }
        RowOutcome::Unassigned => {
            states[i] = NodeState::Unassigned;
            true
        }
    }
}

/// Run the direct interpolation pass over all rows
///
/// Commits one prolongation row per resolvable node and returns the number
/// of nodes left for indirect interpolation.
pub fn build_direct_rows(
    a: &SparseMatrixCSR<f64>,
    coarsening: &Coarsening,
    states: &mut [NodeState],
    builder: &mut ProlongationBuilder,
    config: &InterpolationConfig,
    suspect_rows: &mut Vec<usize>,
) -> Result<usize> {
    let mut unassigned = 0;

    for i in 0..a.n_rows {
        let outcome = direct_row(a, coarsening, i, config)?;
        if apply_direct_outcome(i, outcome, states, builder, suspect_rows) {
            unassigned += 1;
        }
    }

    if unassigned > 0 {
        debug!("pass 1: {} nodes left unassigned", unassigned);
    }
    Ok(unassigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterpolationConfig;

    fn chain5() -> (SparseMatrixCSR<f64>, Coarsening) {
        let a = SparseMatrixCSR::tridiagonal(5, 2.0, -1.0);
        let coarsening = Coarsening::from_coarse_set(5, &[0, 4]);
        (a, coarsening)
    }

    #[test]
    fn test_direct_pass_on_chain() {
        let (a, coarsening) = chain5();
        let config = InterpolationConfig::with_theta(0.25);
        let mut states = coarsening.states().to_vec();
        let mut builder = ProlongationBuilder::new(5, 2);
        let mut suspects = Vec::new();

        let unassigned = build_direct_rows(
            &a, &coarsening, &mut states, &mut builder, &config, &mut suspects,
        )
        .unwrap();

        // Node 2 has no coarse neighbor and stays for the indirect pass
        assert_eq!(unassigned, 1);
        assert_eq!(states[2], NodeState::Unassigned);
        assert!(suspects.is_empty());

        // Coarse nodes map onto themselves
        assert_eq!(builder.row(0), &[(0, 1.0)]);
        assert_eq!(builder.row(4), &[(1, 1.0)]);

        // Node 1: sum_neighbors = -2, sum_interpolatory = -1, diag = 2
        // alpha = -(-2 / -1) / 2 = -1, weight = -1 * -1 = 1
        assert_eq!(builder.row(1), &[(0, 1.0)]);
        assert_eq!(builder.row(3), &[(1, 1.0)]);
        assert_eq!(states[1], NodeState::Assigned { pass: 1 });
    }

    #[test]
    fn test_weak_connection_skipped() {
        // Node 1 couples to coarse node 0 with -0.1 and to coarse node 2
        // with -1.0; with theta = 0.25 the barrier is -0.25 and only the
        // strong connection interpolates.
        let a = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 5, 7],
            vec![0, 1, 0, 1, 2, 1, 2],
            vec![2.0, -0.1, -0.1, 2.0, -1.0, -1.0, 2.0],
        );
        let coarsening = Coarsening::from_coarse_set(3, &[0, 2]);
        let config = InterpolationConfig::with_theta(0.25);

        let outcome = direct_row(&a, &coarsening, 1, &config).unwrap();
        let RowOutcome::Interpolated(scaled) = outcome else {
            panic!("expected an interpolated row");
        };

        // sum_neighbors = -1.1, sum_interpolatory = -1.0, diag = 2
        // alpha = -(-1.1 / -1.0) / 2 = -0.55, weight = -1.0 * -0.55
        assert_eq!(scaled.entries.len(), 1);
        let (col, weight) = scaled.entries[0];
        assert_eq!(col, 1);
        assert!((weight - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_isolated_row_committed_empty() {
        // Node 1 is diagonal-only
        let a = SparseMatrixCSR::new(
            2, 2,
            vec![0, 1, 2],
            vec![0, 1],
            vec![1.0, 1.0],
        );
        let coarsening = Coarsening::from_coarse_set(2, &[0]);
        let config = InterpolationConfig::default();

        let outcome = direct_row(&a, &coarsening, 1, &config).unwrap();
        assert!(matches!(outcome, RowOutcome::Empty));
    }

    #[test]
    fn test_no_negative_connections_left_unassigned() {
        // Node 1 is coupled, but only positively: nothing to interpolate
        // from, so the node is handed to the indirect passes (where stall
        // detection will catch it if it can never resolve).
        let a = SparseMatrixCSR::new(
            2, 2,
            vec![0, 2, 4],
            vec![0, 1, 0, 1],
            vec![2.0, 0.5, 0.5, 2.0],
        );
        let coarsening = Coarsening::from_coarse_set(2, &[0]);
        let config = InterpolationConfig::default();

        let outcome = direct_row(&a, &coarsening, 1, &config).unwrap();
        assert!(matches!(outcome, RowOutcome::Unassigned));
    }
}
