//! Configuration for prolongation construction

use crate::error::{Error, Result};

/// How to handle a row whose interpolatory weights sum to zero
///
/// The row-sum scaling factor divides by the interpolatory sum, so a zero sum
/// leaves the row undefined. This must be an explicit caller choice. The
/// policy covers the zero-sum case only; a zero stored diagonal is the
/// caller's responsibility, as with any M-matrix violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Abort construction with [`Error::NumericDegeneracy`]
    Error,
    /// Commit the row unscaled and report it in
    /// [`Prolongation::suspect_rows`](crate::Prolongation)
    Record,
}

/// Configuration for the Ruge-Stueben interpolation passes
#[derive(Debug, Clone)]
pub struct InterpolationConfig {
    /// Strength threshold in (0, 1]: a connection is strong if its value is
    /// at most `theta` times the most negative off-diagonal entry of its row
    pub theta: f64,

    /// Handling of rows with a zero interpolatory weight sum
    pub degeneracy: DegeneracyPolicy,

    /// Minimum number of rows before the parallel driver uses rayon;
    /// below this (or on a single-core machine) it falls back to the
    /// serial passes
    pub parallel_threshold: usize,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            theta: 0.25, // common default for M-matrix discretizations
            degeneracy: DegeneracyPolicy::Error,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl InterpolationConfig {
    /// Create a config with the given strength threshold
    pub fn with_theta(theta: f64) -> Self {
        Self {
            theta,
            ..Self::default()
        }
    }

    /// Check the caller preconditions, in particular `0 < theta <= 1`
    pub fn validate(&self) -> Result<()> {
        if !(self.theta > 0.0 && self.theta <= 1.0) {
            return Err(Error::InvalidTheta { theta: self.theta });
        }
        Ok(())
    }
}

fn default_parallel_threshold() -> usize {
    if num_cpus::get() > 1 {
        512
    } else {
        usize::MAX
    }
}
