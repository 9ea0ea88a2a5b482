//! Rational expressions: a polynomial over a factored denominator

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::polynomial::Polynomial;
use super::symbol::Symbol;

/// A symbolic scalar `numerator / (f1^e1 * f2^e2 * ...)`
///
/// Every denominator factor is either a single symbol or a primitive
/// polynomial (coprime integer coefficients, positive leading coefficient,
/// no symbol common to all terms). Constants always live in the numerator.
///
/// Arithmetic keeps denominators as the least common multiple of the factor
/// lists but never cancels; [`Expr::simplify`] removes factors that divide
/// the numerator. Equality is mathematical, two differently shaped
/// expressions compare equal when their difference vanishes.
#[derive(Debug, Clone)]
pub struct Expr {
    numer: Polynomial,
    denom: BTreeMap<Polynomial, u32>,
}

impl Expr {
    pub fn zero() -> Self {
        Self::from_polynomial(Polynomial::zero())
    }

    pub fn one() -> Self {
        Self::from_polynomial(Polynomial::one())
    }

    pub fn int(n: i64) -> Self {
        Self::from_polynomial(Polynomial::constant(BigRational::from_integer(BigInt::from(n))))
    }

    /// The fraction `n / d`; panics if `d` is zero
    pub fn rational(n: i64, d: i64) -> Self {
        Self::from_polynomial(Polynomial::constant(BigRational::new(
            BigInt::from(n),
            BigInt::from(d),
        )))
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Self::from_polynomial(Polynomial::symbol(symbol))
    }

    pub fn from_polynomial(numer: Polynomial) -> Self {
        Self {
            numer,
            denom: BTreeMap::new(),
        }
    }

    fn from_parts(numer: Polynomial, denom: BTreeMap<Polynomial, u32>) -> Self {
        if numer.is_zero() {
            return Self::zero();
        }
        Self { numer, denom }
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numer
    }

    /// Denominator factors with their multiplicities
    pub fn denominator_factors(&self) -> impl Iterator<Item = (&Polynomial, u32)> {
        self.denom.iter().map(|(f, &e)| (f, e))
    }

    /// Expanded denominator product
    pub fn denominator(&self) -> Polynomial {
        product(&self.denom)
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// True when there is no denominator
    pub fn is_polynomial(&self) -> bool {
        self.denom.is_empty()
    }

    pub fn add(&self, other: &Expr) -> Expr {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let mut lcm = self.denom.clone();
        for (factor, &exp) in &other.denom {
            let slot = lcm.entry(factor.clone()).or_insert(0);
            *slot = (*slot).max(exp);
        }

        let lhs = &self.numer * &cofactor(&lcm, &self.denom);
        let rhs = &other.numer * &cofactor(&lcm, &other.denom);
        Expr::from_parts(&lhs + &rhs, lcm)
    }

    pub fn sub(&self, other: &Expr) -> Expr {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Expr) -> Expr {
        if self.is_zero() || other.is_zero() {
            return Expr::zero();
        }
        let mut denom = self.denom.clone();
        for (factor, &exp) in &other.denom {
            *denom.entry(factor.clone()).or_insert(0) += exp;
        }
        Expr::from_parts(&self.numer * &other.numer, denom)
    }

    pub fn neg(&self) -> Expr {
        Expr {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }

    /// Reciprocal, `None` for zero
    ///
    /// The numerator moves into the denominator as one symbol factor per
    /// symbol of its monomial content plus its primitive part.
    pub fn recip(&self) -> Option<Expr> {
        if self.is_zero() {
            return None;
        }
        let (content, mono, primitive) = self.numer.split_content();

        let mut denom = BTreeMap::new();
        for &(symbol, exp) in mono.powers() {
            denom.insert(Polynomial::symbol(symbol), exp);
        }
        if !primitive.is_one() {
            *denom.entry(primitive).or_insert(0) += 1;
        }

        let numer = product(&self.denom).scale(&content.recip());
        Some(Expr::from_parts(numer, denom))
    }

    /// Quotient, `None` when dividing by zero
    pub fn div(&self, other: &Expr) -> Option<Expr> {
        other.recip().map(|inv| self.mul(&inv))
    }

    /// Reduce to lowest terms
    ///
    /// Whole denominator factors that divide the numerator are cancelled
    /// first. For the remaining compound factors the polynomial gcd with the
    /// numerator is cancelled, which splits the factor into the shared part
    /// and its cofactor.
    pub fn simplify(&self) -> Expr {
        let mut numer = self.numer.clone();
        let mut denom: BTreeMap<Polynomial, u32> = BTreeMap::new();

        for (factor, &exp) in &self.denom {
            let mut remaining = exp;
            while remaining > 0 {
                match numer.exact_div(factor) {
                    Some(quotient) => {
                        numer = quotient;
                        remaining -= 1;
                    }
                    None => break,
                }
            }
            if remaining == 0 {
                continue;
            }

            let shared = if factor.term_count() > 1 {
                numer.gcd(factor)
            } else {
                Polynomial::one()
            };
            let cofactor = factor.exact_div(&shared).filter(|_| !shared.is_constant());
            let Some(cofactor) = cofactor else {
                *denom.entry(factor.clone()).or_insert(0) += remaining;
                continue;
            };

            let mut shared_left = remaining;
            while shared_left > 0 {
                match numer.exact_div(&shared) {
                    Some(quotient) => {
                        numer = quotient;
                        shared_left -= 1;
                    }
                    None => break,
                }
            }
            if shared_left > 0 {
                *denom.entry(shared).or_insert(0) += shared_left;
            }
            match cofactor.as_constant() {
                Some(c) => numer = numer.scale(&c.pow(remaining as i32).recip()),
                None => *denom.entry(cofactor).or_insert(0) += remaining,
            }
        }

        Expr::from_parts(numer, denom)
    }

    /// Numeric value for the given symbol assignment
    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> Option<f64> {
        let numer = self.numer.evaluate(values)?;
        let denom = self.denom.iter().try_fold(1.0, |acc, (factor, &exp)| {
            factor.evaluate(values).map(|v| acc * v.powi(exp as i32))
        })?;
        Some(numer / denom)
    }
}

fn product(factors: &BTreeMap<Polynomial, u32>) -> Polynomial {
    factors
        .iter()
        .fold(Polynomial::one(), |acc, (factor, &exp)| &acc * &factor.pow(exp))
}

/// `lcm / denom` for a denominator whose factors are a subset of `lcm`
fn cofactor(lcm: &BTreeMap<Polynomial, u32>, denom: &BTreeMap<Polynomial, u32>) -> Polynomial {
    lcm.iter().fold(Polynomial::one(), |acc, (factor, &exp)| {
        let missing = exp - denom.get(factor).copied().unwrap_or(0);
        if missing == 0 {
            acc
        } else {
            &acc * &factor.pow(missing)
        }
    })
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        (self.numer == other.numer && self.denom == other.denom) || self.sub(other).is_zero()
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::symbol(symbol)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::int(n)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait<&'a Expr> for &'a Expr {
            type Output = Expr;

            fn $method(self, rhs: &'a Expr) -> Expr {
                Expr::$method(self, rhs)
            }
        }

        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$method(&self, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::neg(self)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::neg(&self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_empty() {
            return write!(f, "{}", self.numer);
        }

        if self.numer.term_count() > 1 {
            write!(f, "({})/", self.numer)?;
        } else {
            write!(f, "{}/", self.numer)?;
        }

        let single = self.denom.len() == 1 && self.denom.values().all(|&e| e == 1);
        if !single {
            write!(f, "(")?;
        }
        for (n, (factor, &exp)) in self.denom.iter().enumerate() {
            if n > 0 {
                write!(f, "*")?;
            }
            if factor.term_count() > 1 {
                write!(f, "({})", factor)?;
            } else {
                write!(f, "{}", factor)?;
            }
            if exp > 1 {
                write!(f, "^{}", exp)?;
            }
        }
        if !single {
            write!(f, ")")?;
        }
        Ok(())
    }
}
