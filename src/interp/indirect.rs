//! Indirect interpolation passes
//!
//! Nodes the direct pass could not resolve have no strong coarse neighbor.
//! Their rows are composed transitively: each strong negative connection to
//! a neighbor with an already-committed row contributes that neighbor's
//! interpolation weights, scaled by the connection value. Passes repeat
//! (numbered from 2) until every node is resolved; a pass without progress
//! means some fine component has no path to the coarse set and construction
//! fails with a stall error.
//!
//! A node assigned in pass p never contributes to another row of the same
//! pass - only rows finalized in strictly earlier passes (or coarse
//! identity rows) qualify. This keeps every composition acyclic and makes
//! the result independent of the sweep order within a pass.

use log::{debug, warn};

use super::{row_stats, scale_interpolatory, CoarseAccumulator};
use crate::classify::NodeState;
use crate::config::InterpolationConfig;
use crate::error::{Error, Result};
use crate::matrix::{ProlongationBuilder, SparseMatrixCSR};

/// Raw composed row for one unassigned node, before row-sum scaling
pub(crate) struct RawRow {
    pub entries: Vec<(usize, f64)>,
    pub sum_neighbors: f64,
    pub diag: f64,
}

/// Compose the candidate row for node i in the given pass
///
/// Reads only prolongation rows committed in strictly earlier passes.
/// Returns None if no qualified strong neighbor contributes anything, in
/// which case the node is retried in the next pass.
pub(crate) fn indirect_candidate(
    a: &SparseMatrixCSR<f64>,
    states: &[NodeState],
    builder: &ProlongationBuilder,
    i: usize,
    pass: u32,
    theta: f64,
    scratch: &mut CoarseAccumulator,
) -> Option<RawRow> {
    let stats = row_stats(a, i);
    let barrier = theta * stats.dmax;
    let mut sum_neighbors = 0.0;

    for (n, value) in a.off_diag_iter(i) {
        if value >= 0.0 {
            continue;
        }
        if !states[n].has_row_before(pass) {
            continue;
        }
        sum_neighbors += value;
        if value > barrier {
            // Weaker than the threshold
            continue;
        }

        // Compose i's connection to n with n's interpolation weights
        for &(coarse_col, weight) in builder.row(n) {
            scratch.accumulate(coarse_col, value * weight);
        }
    }

    if scratch.is_empty() {
        return None;
    }

    Some(RawRow {
        entries: scratch.drain_sorted(),
        sum_neighbors,
        diag: stats.diag,
    })
}

/// Resolve all unassigned nodes across successive indirect passes
///
/// Returns the number of the last pass on success.
pub fn resolve_indirect_rows(
    a: &SparseMatrixCSR<f64>,
    states: &mut [NodeState],
    builder: &mut ProlongationBuilder,
    mut unassigned: usize,
    config: &InterpolationConfig,
    suspect_rows: &mut Vec<usize>,
) -> Result<u32> {
    let mut scratch = CoarseAccumulator::new(builder.n_cols());
    let mut pass = 2;

    loop {
        let before = unassigned;

        for i in 0..a.n_rows {
            if unassigned == 0 {
                break;
            }
            if states[i] != NodeState::Unassigned || a.is_isolated(i) {
                continue;
            }

            let Some(raw) =
                indirect_candidate(a, states, builder, i, pass, config.theta, &mut scratch)
            else {
                continue;
            };

            let scaled = scale_interpolatory(
                raw.entries,
                raw.sum_neighbors,
                raw.diag,
                i,
                config.degeneracy,
            )?;
            if scaled.suspect {
                suspect_rows.push(i);
            }

            builder.commit_row(i, scaled.entries);
            states[i] = NodeState::Assigned { pass };
            unassigned -= 1;
        }

        debug!("pass {}: {} nodes left unassigned", pass, unassigned);

        if unassigned == 0 {
            return Ok(pass);
        }
        if unassigned == before {
            let stuck: Vec<usize> = (0..a.n_rows)
                .filter(|&i| states[i] == NodeState::Unassigned)
                .collect();
            warn!(
                "indirect interpolation stalled at pass {}: nodes {:?} have no path to the coarse set",
                pass, stuck
            );
            return Err(Error::Stall { pass, stuck });
        }

        pass += 1;
    }
}
