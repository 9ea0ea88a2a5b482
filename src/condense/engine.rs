//! Schur-complement elimination of the hinge block

use super::partition::Partition;
use crate::error::CondenseResult;
use crate::symbolic::SymMatrix;

/// Reduced system over the retained DOFs
#[derive(Debug, Clone)]
pub struct Condensed {
    /// `K22 - K21 * inv(K11) * K12`
    pub k: SymMatrix,
    /// `R2 - K21 * inv(K11) * R1`
    pub r: SymMatrix,
    /// `inv(K11) * (R1 - K12 * D2)`, the hinge displacements
    pub d_hinges: SymMatrix,
}

/// Eliminate the hinge block of `p`
///
/// With `simplify` set every output entry is reduced to lowest terms; the
/// unsimplified form is only useful for debugging the algebra.
pub fn eliminate(p: &Partition, simplify: bool) -> CondenseResult<Condensed> {
    if p.hinge_count() == 0 {
        return Ok(Condensed {
            k: p.k22.clone(),
            r: p.r2.clone(),
            d_hinges: SymMatrix::zeros(0, 1),
        });
    }

    let k11_inv = p.k11.invert()?;
    let k21_k11_inv = p.k21.multiply(&k11_inv)?;

    let k = p.k22.subtract(&k21_k11_inv.multiply(&p.k12)?)?;
    let r = p.r2.subtract(&k21_k11_inv.multiply(&p.r1)?)?;
    let d_hinges = k11_inv.multiply(&p.r1.subtract(&p.k12.multiply(&p.d2)?)?)?;

    log::debug!(
        "Eliminated {} hinge DOFs, {} retained",
        p.hinge_count(),
        p.retained_count()
    );

    if simplify {
        Ok(Condensed {
            k: k.simplify(),
            r: r.simplify(),
            d_hinges: d_hinges.simplify(),
        })
    } else {
        Ok(Condensed { k, r, d_hinges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condense::builder::SymbolicSystem;
    use crate::error::CondenseError;
    use crate::symbolic::{Expr, Symbol};

    fn k(i: usize, j: usize) -> Expr {
        Expr::symbol(Symbol::stiffness(i, j))
    }

    #[test]
    fn test_two_dof_elimination() {
        let system = SymbolicSystem::generic(2).unwrap();
        let reduced = eliminate(&Partition::split(&system, 1).unwrap(), true).unwrap();

        let (r0, r1) = (Expr::symbol(Symbol::load(0)), Expr::symbol(Symbol::load(1)));
        let d1 = Expr::symbol(Symbol::displacement(1));
        let k00_inv = k(0, 0).recip().unwrap();

        assert_eq!(reduced.k.shape(), (1, 1));
        assert_eq!(reduced.k.get(0, 0), &(&k(1, 1) - &(&(&k(0, 1) * &k(0, 1)) * &k00_inv)));
        assert_eq!(reduced.r.entry(0), &(&r1 - &(&(&k(0, 1) * &r0) * &k00_inv)));
        assert_eq!(reduced.d_hinges.entry(0), &(&(&r0 - &(&k(0, 1) * &d1)) * &k00_inv));
    }

    #[test]
    fn test_reduced_stiffness_is_symmetric() {
        let system = SymbolicSystem::generic(4).unwrap();
        let reduced = eliminate(&Partition::split(&system, 2).unwrap(), true).unwrap();
        assert_eq!(reduced.k.shape(), (2, 2));
        assert!(reduced.k.is_symmetric());
    }

    #[test]
    fn test_simplify_does_not_change_values() {
        let system = SymbolicSystem::generic(3).unwrap();
        let p = Partition::split(&system, 2).unwrap();
        let raw = eliminate(&p, false).unwrap();
        let simplified = eliminate(&p, true).unwrap();
        assert_eq!(raw.k, simplified.k);
        assert_eq!(raw.r, simplified.r);
        assert_eq!(raw.d_hinges, simplified.d_hinges);
    }

    #[test]
    fn test_no_hinges_is_identity() {
        let system = SymbolicSystem::generic(3).unwrap();
        let reduced = eliminate(&Partition::split(&system, 0).unwrap(), true).unwrap();
        assert_eq!(&reduced.k, system.stiffness());
        assert_eq!(&reduced.r, system.loads());
        assert_eq!(reduced.d_hinges.nrows(), 0);
    }

    #[test]
    fn test_singular_hinge_block() {
        let stiffness = SymMatrix::from_rows(vec![
            vec![Expr::zero(), k(0, 1)],
            vec![k(0, 1), k(1, 1)],
        ])
        .unwrap();
        let v = |s: fn(usize) -> Symbol| SymMatrix::column(vec![Expr::symbol(s(0)), Expr::symbol(s(1))]);
        let system = SymbolicSystem::from_parts(stiffness, v(Symbol::displacement), v(Symbol::load)).unwrap();

        let result = eliminate(&Partition::split(&system, 1).unwrap(), true);
        assert!(matches!(result, Err(CondenseError::SingularHingeBlock)));
    }
}
