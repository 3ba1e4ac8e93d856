//! Property-based tests for prolongation construction

use proptest::prelude::*;

use rsamg::{
    build_prolongation, build_prolongation_parallel, Coarsening, InterpolationConfig, NodeState,
    SparseMatrixCSR,
};

/// 2-D 5-point Poisson matrix on an nx × ny grid
fn poisson_5pt(nx: usize, ny: usize) -> SparseMatrixCSR<f64> {
    let n = nx * ny;
    let mut row_ptr = vec![0];
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    for y in 0..ny {
        for x in 0..nx {
            if y > 0 {
                col_idx.push((y - 1) * nx + x);
                values.push(-1.0);
            }
            if x > 0 {
                col_idx.push(y * nx + x - 1);
                values.push(-1.0);
            }
            col_idx.push(y * nx + x);
            values.push(4.0);
            if x + 1 < nx {
                col_idx.push(y * nx + x + 1);
                values.push(-1.0);
            }
            if y + 1 < ny {
                col_idx.push((y + 1) * nx + x);
                values.push(-1.0);
            }
            row_ptr.push(col_idx.len());
        }
    }

    SparseMatrixCSR::new(n, n, row_ptr, col_idx, values)
}

/// Check the structural prolongation properties for a completed build
fn check_properties(
    a: &SparseMatrixCSR<f64>,
    coarsening: &Coarsening,
    result: &rsamg::Prolongation,
) {
    let p = &result.matrix;
    assert_eq!(p.n_rows, a.n_rows);
    assert_eq!(p.n_cols, coarsening.n_coarse());

    for i in 0..p.n_rows {
        let row: Vec<(usize, f64)> = p.row_iter(i).collect();

        if a.is_isolated(i) && !coarsening.is_coarse(i) {
            assert!(row.is_empty(), "isolated row {} must stay empty", i);
            continue;
        }

        // P1: row completeness
        assert!(!row.is_empty(), "row {} is empty", i);

        // P2: coarse identity
        if let Some(coarse_col) = coarsening.coarse_index(i) {
            assert_eq!(row, vec![(coarse_col, 1.0)]);
        }

        // P4: column validity and finite weights
        for &(col, value) in &row {
            assert!(col < coarsening.n_coarse());
            assert!(value.is_finite(), "non-finite weight in row {}", i);
        }
    }

    // Every node ends Coarse or Assigned
    for state in &result.states {
        assert!(matches!(
            state,
            NodeState::Coarse | NodeState::Assigned { .. }
        ));
    }
}

proptest! {
    /// Random 1-D chains with coarse nodes at both ends always resolve:
    /// each indirect pass extends the assigned frontier by one node
    #[test]
    fn chain_always_resolves(
        n in 3usize..40,
        flags in prop::collection::vec(any::<bool>(), 40),
        theta in 0.05f64..1.0,
    ) {
        let a = SparseMatrixCSR::tridiagonal(n, 2.0, -1.0);

        let mut coarse: Vec<usize> = vec![0];
        for i in 1..n - 1 {
            if flags[i] {
                coarse.push(i);
            }
        }
        coarse.push(n - 1);
        let coarsening = Coarsening::from_coarse_set(n, &coarse);
        let config = InterpolationConfig::with_theta(theta);

        let result = build_prolongation(&a, &coarsening, &config).unwrap();
        check_properties(&a, &coarsening, &result);

        // P6: passes beyond the first must each have resolved new nodes
        let max_pass = result
            .states
            .iter()
            .filter_map(|s| match s {
                NodeState::Assigned { pass } => Some(*pass),
                _ => None,
            })
            .max()
            .unwrap_or(1);
        prop_assert_eq!(max_pass, result.passes);
    }

    /// 2-D Poisson grids with an even-even coarse set resolve in at most
    /// two passes, and the parallel driver produces the identical result
    #[test]
    fn grid_serial_and_parallel_agree(
        nx in 2usize..8,
        ny in 2usize..8,
        theta in 0.05f64..1.0,
    ) {
        let a = poisson_5pt(nx, ny);
        let coarse: Vec<usize> = (0..ny)
            .flat_map(|y| (0..nx).map(move |x| (x, y)))
            .filter(|&(x, y)| x % 2 == 0 && y % 2 == 0)
            .map(|(x, y)| y * nx + x)
            .collect();
        let coarsening = Coarsening::from_coarse_set(nx * ny, &coarse);

        let mut config = InterpolationConfig::with_theta(theta);
        config.parallel_threshold = 0;

        let serial = build_prolongation(&a, &coarsening, &config).unwrap();
        check_properties(&a, &coarsening, &serial);
        prop_assert!(serial.passes <= 2);

        let parallel = build_prolongation_parallel(&a, &coarsening, &config).unwrap();
        prop_assert_eq!(&serial.matrix, &parallel.matrix);
        prop_assert_eq!(&serial.states, &parallel.states);
        prop_assert_eq!(serial.passes, parallel.passes);
    }
}
