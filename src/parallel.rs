//! # Parallel prolongation construction
//!
//! This module provides a rayon-parallel variant of the pass drivers. Rows
//! within one pass are independent: the direct pass reads only the matrix
//! and the immutable initial classification, and an indirect candidate reads
//! only rows finalized in strictly earlier passes. Candidates for a pass are
//! therefore computed in parallel against the pre-pass snapshot and
//! committed sequentially after the pass barrier, which also makes the
//! result identical to the serial driver.

use rayon::prelude::*;

use crate::classify::{Coarsening, NodeState};
use crate::config::InterpolationConfig;
use crate::error::{Error, Result};
use crate::interp::accumulator::CoarseAccumulator;
use crate::interp::direct::{apply_direct_outcome, direct_row};
use crate::interp::indirect::indirect_candidate;
use crate::interp::{build_prolongation, scale_interpolatory, Prolongation};
use crate::matrix::{ProlongationBuilder, SparseMatrixCSR};

use log::{debug, warn};

/// Build the prolongation operator with row-parallel passes
///
/// Semantically identical to [`build_prolongation`]; rows of each pass are
/// evaluated with rayon. Falls back to the serial driver for matrices below
/// [`InterpolationConfig::parallel_threshold`].
///
/// # Arguments
///
/// * `a` - The operator matrix on this level (square, CSR)
/// * `coarsening` - Coarse/fine classification and coarse renumbering
/// * `config` - Strength threshold and degeneracy policy
///
/// # Errors
///
/// Same error contract as [`build_prolongation`].
pub fn build_prolongation_parallel(
    a: &SparseMatrixCSR<f64>,
    coarsening: &Coarsening,
    config: &InterpolationConfig,
) -> Result<Prolongation> {
    config.validate()?;

    if a.n_rows < config.parallel_threshold {
        return build_prolongation(a, coarsening, config);
    }

    assert_eq!(a.n_rows, a.n_cols, "Operator matrix must be square");
    assert_eq!(
        a.n_rows,
        coarsening.len(),
        "Classification length must match the matrix row count"
    );

    let mut states = coarsening.states().to_vec();
    let mut builder = ProlongationBuilder::new(a.n_rows, coarsening.n_coarse());
    let mut suspect_rows = Vec::new();

    // Direct pass: evaluate all rows in parallel, commit sequentially
    let outcomes = (0..a.n_rows)
        .into_par_iter()
        .map(|i| direct_row(a, coarsening, i, config))
        .collect::<Result<Vec<_>>>()?;

    let mut unassigned = 0;
    for (i, outcome) in outcomes.into_iter().enumerate() {
        if apply_direct_outcome(i, outcome, &mut states, &mut builder, &mut suspect_rows) {
            unassigned += 1;
        }
    }
    if unassigned > 0 {
        debug!("pass 1: {} nodes left unassigned", unassigned);
    }

    let mut pass = 1;
    while unassigned > 0 {
        pass += 1;
        // Candidates read the pre-pass snapshot of states and builder only;
        // commits happen after this barrier
        let candidates: Vec<_> = (0..a.n_rows)
            .into_par_iter()
            .filter(|&i| states[i] == NodeState::Unassigned && !a.is_isolated(i))
            .map_init(
                || CoarseAccumulator::new(builder.n_cols()),
                |scratch, i| {
                    indirect_candidate(a, &states, &builder, i, pass, config.theta, scratch)
                        .map(|raw| (i, raw))
                },
            )
            .flatten()
            .collect();

        if candidates.is_empty() {
            let stuck: Vec<usize> = (0..a.n_rows)
                .filter(|&i| states[i] == NodeState::Unassigned)
                .collect();
            warn!(
                "indirect interpolation stalled at pass {}: nodes {:?} have no path to the coarse set",
                pass, stuck
            );
            return Err(Error::Stall { pass, stuck });
        }

        for (i, raw) in candidates {
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
    }

    Ok(Prolongation {
        matrix: builder.finalize(),
        states,
        passes: pass,
        suspect_rows,
    })
}
