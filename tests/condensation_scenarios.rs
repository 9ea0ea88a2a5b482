use std::collections::HashMap;

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};

use fea_condense::condense::{reorder, unreorder};
use fea_condense::prelude::*;

fn k(i: usize, j: usize) -> Expr {
    Expr::symbol(Symbol::stiffness(i, j))
}

fn r(i: usize) -> Expr {
    Expr::symbol(Symbol::load(i))
}

fn d(i: usize) -> Expr {
    Expr::symbol(Symbol::displacement(i))
}

fn run(size: usize, hinges: Vec<usize>) -> Condensation {
    let system = SymbolicSystem::generic(size).unwrap();
    let hinges = HingeSet::new(hinges, size).unwrap();
    condense(&system, &hinges, &CondensationOptions::default()).unwrap()
}

#[test]
fn two_dof_truss_with_first_dof_hinged() {
    let result = run(2, vec![0]);
    let k00_inv = k(0, 0).recip().unwrap();

    let kred = &k(1, 1) - &(&(&k(0, 1) * &k(0, 1)) * &k00_inv);
    let rred = &r(1) - &(&(&k(0, 1) * &r(0)) * &k00_inv);
    let d0 = &(&r(0) - &(&k(0, 1) * &d(1))) * &k00_inv;

    assert_eq!(result.reduced.k.get(0, 0), &kred);
    assert_eq!(result.reduced.r.entry(0), &rred);
    assert_eq!(result.reduced.d_hinges.entry(0), &d0);

    let expected = SymMatrix::from_rows(vec![
        vec![Expr::zero(), Expr::zero()],
        vec![Expr::zero(), kred],
    ])
    .unwrap();
    assert_eq!(result.full.k, expected);
    assert_eq!(result.full.r.entry(0), &Expr::zero());
    assert_eq!(result.full.d.entry(0), &d0);
    assert_eq!(result.full.d.entry(1), &d(1));
}

#[test]
fn two_dof_code_output() {
    let result = run(2, vec![0]);
    let options = CondensationOptions::default();
    let report = Report::new(&result, &options).render();

    assert!(report.starts_with("    Size: 2, hinges: [0]"));
    assert!(report
        .lines()
        .any(|line| line.trim() == "k.SetSym(1, 1, (k00*k11 - k01*k01)/k00)"));
    assert_eq!(report.matches(".SetSym(").count(), 3);
    assert_eq!(report.matches(".SetVec(").count(), 4);
}

#[test]
fn four_dof_hinged_at_both_ends() {
    let result = run(4, vec![0, 3]);

    assert_eq!(result.reduced.k.shape(), (2, 2));
    assert_eq!(result.full.k.shape(), (4, 4));
    for h in [0, 3] {
        assert!(result.full.k.is_zero_row(h));
        assert!(result.full.k.is_zero_column(h));
        assert!(result.full.r.entry(h).is_zero());
    }
    assert_eq!(result.full.k.select(&[1, 2], &[1, 2]), result.reduced.k);
    assert!(result.full.k.is_symmetric());
}

#[test]
fn unsorted_hinges_are_rejected() {
    assert!(matches!(
        HingeSet::new(vec![2, 0], 4),
        Err(CondenseError::UnsortedHinges(ref h)) if h == &vec![2, 0]
    ));
}

#[test]
fn invalid_hinge_sets_are_rejected() {
    assert!(matches!(
        HingeSet::new(vec![1, 1], 4),
        Err(CondenseError::DuplicateHinge(1))
    ));
    assert!(matches!(
        HingeSet::new(vec![0, 4], 4),
        Err(CondenseError::HingeOutOfRange { index: 4, size: 4 })
    ));
    assert!(matches!(
        HingeSet::new(vec![0, 1], 2),
        Err(CondenseError::NoRetainedDofs(2))
    ));
    assert!(matches!(SymbolicSystem::generic(0), Err(CondenseError::InvalidSize(0))));
}

#[test]
fn hinges_for_another_size_are_rejected() {
    let system = SymbolicSystem::generic(3).unwrap();
    let hinges = HingeSet::new(vec![0], 4).unwrap();
    let result = condense(&system, &hinges, &CondensationOptions::default());
    assert!(matches!(result, Err(CondenseError::DimensionMismatch(_))));
}

#[test]
fn reorder_round_trip() {
    let system = SymbolicSystem::generic(5).unwrap();
    for hinges in [vec![], vec![0], vec![4], vec![1, 3], vec![0, 2, 3]] {
        let hinges = HingeSet::new(hinges, 5).unwrap();
        let reordered = reorder(&system, &hinges).unwrap();
        assert!(reordered.stiffness().is_symmetric());
        for (p, &h) in hinges.indices().iter().enumerate() {
            assert_eq!(reordered.loads().entry(p), &r(h));
        }
        assert_eq!(unreorder(&reordered, &hinges).unwrap(), system);
    }
}

#[test]
fn beam2d_pinned_at_i_end() {
    // EI = L = 1
    let stiffness = SymMatrix::from_rows(
        [
            [12, 6, -12, 6],
            [6, 4, -6, 2],
            [-12, -6, 12, -6],
            [6, 2, -6, 4],
        ]
        .iter()
        .map(|row| row.iter().map(|&v| Expr::int(v)).collect())
        .collect(),
    )
    .unwrap();
    let system = SymbolicSystem::from_parts(
        stiffness,
        SymMatrix::column((0..4).map(d).collect()),
        SymMatrix::column((0..4).map(r).collect()),
    )
    .unwrap();

    let hinges = EndReleases::pin_i(ElementKind::Beam2d).hinges().unwrap();
    let result = condense(&system, &hinges, &CondensationOptions::default()).unwrap();

    let expected = SymMatrix::from_rows(
        [[3, 0, -3, 3], [0, 0, 0, 0], [-3, 0, 3, -3], [3, 0, -3, 3]]
            .iter()
            .map(|row| row.iter().map(|&v| Expr::int(v)).collect())
            .collect(),
    )
    .unwrap();
    assert_eq!(result.full.k, expected);

    let coupling = &(&(&Expr::int(6) * &d(0)) - &(&Expr::int(6) * &d(2))) + &(&Expr::int(2) * &d(3));
    let rotation = &(&r(1) - &coupling) * &Expr::rational(1, 4);
    assert_eq!(result.full.d.entry(1), &rotation);
}

#[test]
fn repeated_stiffness_symbols_reduce_to_lowest_terms() {
    let stiffness = SymMatrix::from_rows(vec![
        vec![k(0, 0), k(0, 1), k(0, 2)],
        vec![k(0, 1), k(0, 0), k(0, 2)],
        vec![k(0, 2), k(0, 2), k(2, 2)],
    ])
    .unwrap();
    let system = SymbolicSystem::from_parts(
        stiffness,
        SymMatrix::column((0..3).map(d).collect()),
        SymMatrix::column((0..3).map(r).collect()),
    )
    .unwrap();
    let hinges = HingeSet::new(vec![0, 1], 3).unwrap();
    let options = CondensationOptions::default().code_only();
    let result = condense(&system, &hinges, &options).unwrap();

    let entry = result.full.k.get(2, 2);
    assert_eq!(entry.to_string(), "(k00*k22 + k01*k22 - 2*k02^2)/(k00 + k01)");

    let report = Report::new(&result, &options).render();
    assert!(report
        .lines()
        .any(|line| line.trim() == "k.SetSym(2, 2, (k00*k22 + k01*k22 - 2*k02*k02)/(k00 + k01))"));
}

/// Symmetric positive definite values for every stiffness symbol
fn spd_values(n: usize) -> DMatrix<f64> {
    let b = DMatrix::from_fn(n, n, |i, j| ((i * 7 + j * 3) % 5) as f64 + 0.5 * (i + 1) as f64);
    b.transpose() * &b + DMatrix::identity(n, n) * n as f64
}

fn assignment(kk: &DMatrix<f64>, rr: &DVector<f64>, dd: &DVector<f64>) -> HashMap<Symbol, f64> {
    let n = kk.nrows();
    let mut values = HashMap::new();
    for i in 0..n {
        for j in i..n {
            values.insert(Symbol::stiffness(i, j), kk[(i, j)]);
        }
        values.insert(Symbol::load(i), rr[i]);
        values.insert(Symbol::displacement(i), dd[i]);
    }
    values
}

#[test]
fn symbolic_result_matches_numeric_condensation() {
    for (n, hinges) in [(4, vec![1, 2]), (5, vec![0, 4]), (6, vec![2, 5])] {
        let kk = spd_values(n);
        let rr = DVector::from_fn(n, |i, _| 1.0 + i as f64);
        let dd = DVector::from_fn(n, |i, _| 0.25 * i as f64 - 0.5);
        let values = assignment(&kk, &rr, &dd);

        let result = run(n, hinges.clone());
        let retained: Vec<usize> = (0..n).filter(|i| !hinges.contains(i)).collect();

        let khh = kk.select_rows(&hinges).select_columns(&hinges);
        let khr = kk.select_rows(&hinges).select_columns(&retained);
        let krr = kk.select_rows(&retained).select_columns(&retained);
        let rh = rr.select_rows(&hinges);
        let rr2 = rr.select_rows(&retained);
        let dr = dd.select_rows(&retained);

        let khh_inv = khh.try_inverse().unwrap();
        let kred = &krr - khr.transpose() * &khh_inv * &khr;
        let rred = &rr2 - khr.transpose() * &khh_inv * &rh;
        let dh = &khh_inv * (&rh - &khr * &dr);

        for (a, &i) in retained.iter().enumerate() {
            for (b, &j) in retained.iter().enumerate() {
                let value = result.full.k.get(i, j).evaluate(&values).unwrap();
                assert_relative_eq!(value, kred[(a, b)], epsilon = 1e-9, max_relative = 1e-9);
            }
            let value = result.full.r.entry(i).evaluate(&values).unwrap();
            assert_relative_eq!(value, rred[a], epsilon = 1e-9, max_relative = 1e-9);
        }
        for (a, &h) in hinges.iter().enumerate() {
            let value = result.full.d.entry(h).evaluate(&values).unwrap();
            assert_relative_eq!(value, dh[a], epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
