//! Coarse/fine node classification
//!
//! Every matrix row carries exactly one state tag. Coarsening hands the
//! builders an initial classification (Coarse / FineDirect / Unassigned);
//! the interpolation passes move fine nodes to `Assigned` as their
//! prolongation rows are committed. The pass payload records *when* a row
//! became available, which is what later passes check before composing
//! through a neighbor.

/// Classification state of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Retained on the next-coarser level; interpolates to itself
    Coarse,
    /// Fine node expected to be resolved by the direct pass
    FineDirect,
    /// Fine node waiting for indirect interpolation
    Unassigned,
    /// Fine node whose prolongation row was committed in the given pass
    /// (pass 1 is the direct pass, indirect passes start at 2)
    Assigned {
        /// Pass in which the row was committed
        pass: u32,
    },
}

impl NodeState {
    /// Whether this node is coarse
    pub fn is_coarse(&self) -> bool {
        matches!(self, NodeState::Coarse)
    }

    /// Whether this node's prolongation row was finalized before the given
    /// pass and may therefore contribute to rows being composed in that pass
    ///
    /// Coarse rows are committed up front; fine rows qualify only if their
    /// assignment pass is strictly earlier. Nodes assigned *in* `pass` do
    /// not qualify, which keeps composition within a pass acyclic.
    pub fn has_row_before(&self, pass: u32) -> bool {
        match self {
            NodeState::Coarse => true,
            NodeState::Assigned { pass: assigned } => *assigned < pass,
            NodeState::FineDirect | NodeState::Unassigned => false,
        }
    }
}

/// Coarse/fine splitting consumed by the prolongation builders
///
/// Produced by an external strength-of-connection coarsening step. Holds the
/// initial per-node states, the renumbering of coarse nodes onto the
/// next-coarser level, and the coarse node count.
#[derive(Debug, Clone)]
pub struct Coarsening {
    states: Vec<NodeState>,
    coarse_index: Vec<Option<usize>>,
    n_coarse: usize,
}

impl Coarsening {
    /// Create a classification from per-node states and the coarse
    /// renumbering
    ///
    /// # Panics
    ///
    /// Panics if the arrays disagree in length, a state is already
    /// `Assigned`, a coarse index is present on a non-coarse node (or
    /// missing on a coarse one), or the coarse indices are not a
    /// permutation of `0..n_coarse`.
    pub fn new(states: Vec<NodeState>, coarse_index: Vec<Option<usize>>) -> Self {
        assert_eq!(
            states.len(),
            coarse_index.len(),
            "states and coarse_index must have the same length"
        );

        let n_coarse = states.iter().filter(|s| s.is_coarse()).count();
        let mut seen = vec![false; n_coarse];

        for (i, (state, index)) in states.iter().zip(&coarse_index).enumerate() {
            assert!(
                !matches!(*state, NodeState::Assigned { .. }),
                "Node {} is pre-assigned; initial states must be Coarse, FineDirect or Unassigned",
                i
            );
            match (state.is_coarse(), *index) {
                (true, Some(c)) => {
                    assert!(c < n_coarse, "Coarse index {} out of bounds (n_coarse = {})", c, n_coarse);
                    assert!(!seen[c], "Coarse index {} assigned twice", c);
                    seen[c] = true;
                }
                (true, None) => panic!("Coarse node {} has no coarse index", i),
                (false, Some(_)) => panic!("Non-coarse node {} has a coarse index", i),
                (false, None) => {}
            }
        }

        Self {
            states,
            coarse_index,
            n_coarse,
        }
    }

    /// Convenience constructor: mark the listed nodes coarse (numbered in
    /// list order), everything else `FineDirect`
    pub fn from_coarse_set(n: usize, coarse: &[usize]) -> Self {
        let mut states = vec![NodeState::FineDirect; n];
        let mut coarse_index = vec![None; n];

        for (next_index, &node) in coarse.iter().enumerate() {
            assert!(node < n, "Coarse node {} out of bounds (n = {})", node, n);
            assert!(!states[node].is_coarse(), "Coarse node {} listed twice", node);
            states[node] = NodeState::Coarse;
            coarse_index[node] = Some(next_index);
        }

        Self {
            states,
            coarse_index,
            n_coarse: coarse.len(),
        }
    }

    /// Number of nodes on this level
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether there are no nodes at all
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of coarse nodes (columns of the prolongation matrix)
    pub fn n_coarse(&self) -> usize {
        self.n_coarse
    }

    /// The initial per-node states
    pub fn states(&self) -> &[NodeState] {
        &self.states
    }

    /// Whether node i is coarse
    pub fn is_coarse(&self, i: usize) -> bool {
        self.states[i].is_coarse()
    }

    /// The next-coarser-level row index of node i, `Some` iff coarse
    pub fn coarse_index(&self, i: usize) -> Option<usize> {
        self.coarse_index[i]
    }
}
