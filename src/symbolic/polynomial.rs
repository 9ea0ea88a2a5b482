//! Sparse multivariate polynomials with exact rational coefficients

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::symbol::Symbol;

/// Product of symbol powers, e.g. `k00*k11^2`
///
/// Powers are kept sorted by symbol and never carry a zero exponent, so
/// structural equality is mathematical equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Monomial(Vec<(Symbol, u32)>);

impl Monomial {
    /// The empty product
    pub fn one() -> Self {
        Self(Vec::new())
    }

    /// A single symbol to the first power
    pub fn var(symbol: Symbol) -> Self {
        Self(vec![(symbol, 1)])
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Total degree
    pub fn degree(&self) -> u32 {
        self.0.iter().map(|&(_, e)| e).sum()
    }

    /// Symbol powers in ascending symbol order
    pub fn powers(&self) -> &[(Symbol, u32)] {
        &self.0
    }

    /// Product of two monomials
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((a[i].0, a[i].1 + b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Monomial(out)
    }

    /// Quotient `self / other`, or `None` when `other` does not divide `self`
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        let divisor = &other.0;
        let mut out = Vec::with_capacity(self.0.len());
        let mut j = 0;
        for &(symbol, exp) in &self.0 {
            if j < divisor.len() && divisor[j].0 < symbol {
                return None;
            }
            if j < divisor.len() && divisor[j].0 == symbol {
                let div_exp = divisor[j].1;
                j += 1;
                match exp.cmp(&div_exp) {
                    Ordering::Less => return None,
                    Ordering::Equal => {}
                    Ordering::Greater => out.push((symbol, exp - div_exp)),
                }
            } else {
                out.push((symbol, exp));
            }
        }
        if j < divisor.len() {
            return None;
        }
        Some(Monomial(out))
    }

    /// Greatest common divisor (minimum exponent per shared symbol)
    pub fn gcd(&self, other: &Monomial) -> Monomial {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push((a[i].0, a[i].1.min(b[j].1)));
                    i += 1;
                    j += 1;
                }
            }
        }
        Monomial(out)
    }

    /// Exponent of `symbol`, zero if absent
    pub fn exponent_of(&self, symbol: Symbol) -> u32 {
        self.0
            .iter()
            .find(|(s, _)| *s == symbol)
            .map_or(0, |&(_, e)| e)
    }

    /// The monomial with `symbol` removed
    fn without(&self, symbol: Symbol) -> Monomial {
        Monomial(self.0.iter().copied().filter(|(s, _)| *s != symbol).collect())
    }

    /// Exponents reduced by `other`, saturating at zero
    fn strip(&self, other: &Monomial) -> Monomial {
        let out = self
            .0
            .iter()
            .filter_map(|&(symbol, exp)| {
                let removed = other
                    .0
                    .iter()
                    .find(|(s, _)| *s == symbol)
                    .map_or(0, |&(_, e)| e);
                let left = exp.saturating_sub(removed);
                (left > 0).then_some((symbol, left))
            })
            .collect();
        Monomial(out)
    }

    fn evaluate(&self, values: &HashMap<Symbol, f64>) -> Option<f64> {
        self.0.iter().try_fold(1.0, |acc, &(symbol, exp)| {
            values.get(&symbol).map(|v| acc * v.powi(exp as i32))
        })
    }
}

/// Graded lexicographic order: total degree first, then the exponent of the
/// smallest symbol where the two monomials differ.
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree().cmp(&other.degree()).then_with(|| {
            let (a, b) = (&self.0, &other.0);
            let (mut i, mut j) = (0, 0);
            loop {
                match (a.get(i), b.get(j)) {
                    (None, None) => return Ordering::Equal,
                    (Some(_), None) => return Ordering::Greater,
                    (None, Some(_)) => return Ordering::Less,
                    (Some(&(sa, ea)), Some(&(sb, eb))) => match sa.cmp(&sb) {
                        Ordering::Less => return Ordering::Greater,
                        Ordering::Greater => return Ordering::Less,
                        Ordering::Equal => {
                            if ea != eb {
                                return ea.cmp(&eb);
                            }
                            i += 1;
                            j += 1;
                        }
                    },
                }
            }
        })
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        for (n, (symbol, exp)) in self.0.iter().enumerate() {
            if n > 0 {
                write!(f, "*")?;
            }
            if *exp == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}^{}", symbol, exp)?;
            }
        }
        Ok(())
    }
}

/// Multivariate polynomial over the rationals
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::one(), value);
        p
    }

    pub fn symbol(symbol: Symbol) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::var(symbol), BigRational::one());
        p
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// The constant value, if the polynomial has no symbols
    pub fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self
                .terms
                .get(&Monomial::one())
                .cloned(),
            _ => None,
        }
    }

    /// The single symbol `x` if the polynomial is exactly `x`
    pub fn as_symbol(&self) -> Option<Symbol> {
        let (mono, coeff) = self.terms.iter().next()?;
        match (self.terms.len(), mono.powers()) {
            (1, [(symbol, 1)]) if coeff.is_one() => Some(*symbol),
            _ => None,
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Terms from the highest monomial down
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter().rev()
    }

    pub fn leading_term(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.last_key_value()
    }

    /// All symbols that occur in the polynomial
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.terms
            .keys()
            .flat_map(|m| m.powers().iter().map(|&(s, _)| s))
            .collect()
    }

    fn add_term(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.get_mut(&mono) {
            Some(existing) => {
                *existing += coeff;
                if existing.is_zero() {
                    self.terms.remove(&mono);
                }
            }
            None => {
                self.terms.insert(mono, coeff);
            }
        }
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: &BigRational) -> Polynomial {
        if factor.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c * factor))
                .collect(),
        }
    }

    /// Integer power by repeated multiplication
    pub fn pow(&self, exp: u32) -> Polynomial {
        (0..exp).fold(Polynomial::one(), |acc, _| &acc * self)
    }

    /// Exact quotient `self / divisor`
    ///
    /// Returns `None` when the division leaves a remainder. Under a monomial
    /// order the leading term of any multiple of `divisor` is divisible by the
    /// divisor's leading term, so the first failing step proves inexactness.
    pub fn exact_div(&self, divisor: &Polynomial) -> Option<Polynomial> {
        let (lead_mono, lead_coeff) = divisor.leading_term()?;
        let (lead_mono, lead_coeff) = (lead_mono.clone(), lead_coeff.clone());
        let mut remainder = self.clone();
        let mut quotient = Polynomial::zero();

        while let Some((mono, coeff)) = remainder.leading_term() {
            let q_mono = mono.div(&lead_mono)?;
            let q_coeff = coeff / &lead_coeff;
            for (m, c) in &divisor.terms {
                remainder.add_term(m.mul(&q_mono), -(c * &q_coeff));
            }
            quotient.add_term(q_mono, q_coeff);
        }

        Some(quotient)
    }

    /// Split into `content * monomial * primitive`
    ///
    /// The primitive part has coprime integer coefficients, a positive
    /// leading coefficient and no symbol common to all of its terms.
    pub fn split_content(&self) -> (BigRational, Monomial, Polynomial) {
        if self.is_zero() {
            return (BigRational::zero(), Monomial::one(), Polynomial::zero());
        }

        let mono = self
            .terms
            .keys()
            .skip(1)
            .fold(self.terms.keys().next().cloned().unwrap_or_default(), |g, m| {
                g.gcd(m)
            });

        let content = self.content();
        let primitive = Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.strip(&mono), c / &content))
                .collect(),
        };

        (content, mono, primitive)
    }

    /// Signed numeric content: the rational whose quotient has coprime
    /// integer coefficients and a positive leading coefficient
    fn content(&self) -> BigRational {
        let mut numer_gcd = BigInt::zero();
        let mut denom_lcm = BigInt::one();
        for c in self.terms.values() {
            numer_gcd = gcd(&numer_gcd, c.numer());
            denom_lcm = lcm(&denom_lcm, c.denom());
        }
        let content = BigRational::new(numer_gcd, denom_lcm);
        if self.leading_term().is_some_and(|(_, c)| c.is_negative()) {
            -content
        } else {
            content
        }
    }

    /// Scaled to coprime integer coefficients with a positive leading one
    pub fn normalized(&self) -> Polynomial {
        if self.is_zero() {
            return Polynomial::zero();
        }
        self.scale(&self.content().recip())
    }

    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(Monomial::is_one)
    }

    /// Highest power of `x`
    pub fn degree_in(&self, x: Symbol) -> u32 {
        self.terms.keys().map(|m| m.exponent_of(x)).max().unwrap_or(0)
    }

    /// Coefficient of `x^d` when the polynomial is read as univariate in `x`
    pub fn coefficient_in(&self, x: Symbol, d: u32) -> Polynomial {
        Polynomial {
            terms: self
                .terms
                .iter()
                .filter(|(m, _)| m.exponent_of(x) == d)
                .map(|(m, c)| (m.without(x), c.clone()))
                .collect(),
        }
    }

    /// Greatest common divisor, normalized
    ///
    /// Recursive primitive remainder sequence in the largest shared symbol,
    /// with contents taken over the remaining symbols. Constants have a gcd
    /// of one.
    pub fn gcd(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() {
            return other.normalized();
        }
        if other.is_zero() {
            return self.normalized();
        }
        if self.is_constant() || other.is_constant() {
            return Polynomial::one();
        }
        if self.term_count() == 1 || other.term_count() == 1 {
            let mono = self
                .terms
                .keys()
                .chain(other.terms.keys())
                .skip(1)
                .fold(
                    self.terms.keys().next().cloned().unwrap_or_default(),
                    |g, m| g.gcd(m),
                );
            let mut p = Polynomial::zero();
            p.add_term(mono, BigRational::one());
            return p;
        }

        let shared = self.symbols();
        let Some(x) = other
            .symbols()
            .into_iter()
            .filter(|s| shared.contains(s))
            .next_back()
        else {
            return Polynomial::one();
        };

        let (ca, pa) = self.content_in(x);
        let (cb, pb) = other.content_in(x);
        let c = ca.gcd(&cb);
        let g = if pa.degree_in(x) == 0 || pb.degree_in(x) == 0 {
            Polynomial::one()
        } else {
            primitive_remainder_gcd(pa, pb, x)
        };
        (&c * &g).normalized()
    }

    /// Split into the gcd of the coefficients in `x` and the primitive rest
    fn content_in(&self, x: Symbol) -> (Polynomial, Polynomial) {
        let mut content: Option<Polynomial> = None;
        for d in 0..=self.degree_in(x) {
            let coeff = self.coefficient_in(x, d);
            if coeff.is_zero() {
                continue;
            }
            let next = match &content {
                Some(c) => c.gcd(&coeff),
                None => coeff.normalized(),
            };
            let done = next.is_constant();
            content = Some(next);
            if done {
                break;
            }
        }

        match content {
            Some(c) if !c.is_constant() => match self.exact_div(&c) {
                Some(primitive) => (c, primitive),
                None => (Polynomial::one(), self.clone()),
            },
            _ => (Polynomial::one(), self.clone()),
        }
    }

    /// `lc(b)^k * a mod b` in `x`, with `k` just large enough to stay
    /// fraction free in the other symbols
    fn pseudo_remainder(&self, divisor: &Polynomial, x: Symbol) -> Polynomial {
        let db = divisor.degree_in(x);
        let lead = divisor.coefficient_in(x, db);
        let mut rem = self.clone();
        while !rem.is_zero() && rem.degree_in(x) >= db {
            let dr = rem.degree_in(x);
            let mut shift = Polynomial::zero();
            let shift_mono = if dr == db {
                Monomial::one()
            } else {
                Monomial(vec![(x, dr - db)])
            };
            shift.add_term(shift_mono, BigRational::one());
            let top = &rem.coefficient_in(x, dr) * &shift;
            rem = &(&lead * &rem) - &(&top * divisor);
        }
        rem
    }

    /// Numeric value for the given symbol assignment
    ///
    /// Returns `None` if a symbol of the polynomial has no value.
    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> Option<f64> {
        self.terms.iter().try_fold(0.0, |acc, (m, c)| {
            let coeff = c.to_f64()?;
            Some(acc + coeff * m.evaluate(values)?)
        })
    }
}

/// Gcd of two polynomials that are primitive in `x` with positive degree
fn primitive_remainder_gcd(a: Polynomial, b: Polynomial, x: Symbol) -> Polynomial {
    let (mut a, mut b) = if a.degree_in(x) >= b.degree_in(x) {
        (a, b)
    } else {
        (b, a)
    };
    loop {
        let rem = a.pseudo_remainder(&b, x);
        if rem.is_zero() {
            return b;
        }
        if rem.degree_in(x) == 0 {
            return Polynomial::one();
        }
        a = b;
        b = rem.content_in(x).1;
    }
}

fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / gcd(a, b)
}

impl<'a> Add<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }
}

impl<'a> Sub<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), -c.clone());
        }
        out
    }
}

impl<'a> Mul<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &rhs.terms {
                out.add_term(m1.mul(m2), c1 * c2);
            }
        }
        out
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (n, (mono, coeff)) in self.terms().enumerate() {
            let negative = coeff.is_negative();
            match (n, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = coeff.abs();
            if mono.is_one() {
                write!(f, "{}", magnitude)?;
            } else if magnitude.is_one() {
                write!(f, "{}", mono)?;
            } else {
                write!(f, "{}*{}", magnitude, mono)?;
            }
        }
        Ok(())
    }
}
