//! C-like source expressions for emitted assignment statements

use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::symbolic::{Expr, Monomial, Polynomial};

/// Formats expressions as code
///
/// Powers up to `max_power` are written as repeated products, higher ones
/// as `pow(x, n)`. Rational coefficients become floating point divisions.
#[derive(Debug, Clone, Copy)]
pub struct CodeFormatter {
    max_power: u32,
}

impl Default for CodeFormatter {
    fn default() -> Self {
        Self { max_power: 6 }
    }
}

impl CodeFormatter {
    pub fn new(max_power: u32) -> Self {
        Self { max_power }
    }

    pub fn expr(&self, expr: &Expr) -> String {
        let numer = expr.numerator();
        let factors: Vec<(&Polynomial, u32)> = expr.denominator_factors().collect();
        if factors.is_empty() {
            return self.polynomial(numer);
        }

        let mut out = if numer.term_count() > 1 {
            format!("({})", self.polynomial(numer))
        } else {
            self.polynomial(numer)
        };
        out.push('/');

        let parts: Vec<String> = factors
            .iter()
            .map(|&(factor, exp)| {
                let base = if factor.term_count() > 1 {
                    format!("({})", self.polynomial(factor))
                } else {
                    self.polynomial(factor)
                };
                self.power(&base, exp)
            })
            .collect();
        match parts.as_slice() {
            [part] if factors[0].1 == 1 => out.push_str(part),
            _ => {
                out.push('(');
                out.push_str(&parts.join("*"));
                out.push(')');
            }
        }
        out
    }

    pub fn polynomial(&self, poly: &Polynomial) -> String {
        if poly.is_zero() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (n, (mono, coeff)) in poly.terms().enumerate() {
            match (n, coeff.is_negative()) {
                (0, true) => out.push('-'),
                (0, false) => {}
                (_, true) => out.push_str(" - "),
                (_, false) => out.push_str(" + "),
            }
            out.push_str(&self.term(mono, &coeff.abs()));
        }
        out
    }

    fn term(&self, mono: &Monomial, magnitude: &BigRational) -> String {
        if mono.is_one() {
            return coefficient(magnitude);
        }
        let product = self.monomial(mono);
        if magnitude.is_one() {
            product
        } else if magnitude.is_integer() {
            format!("{}*{}", magnitude, product)
        } else {
            format!("({})*{}", coefficient(magnitude), product)
        }
    }

    fn monomial(&self, mono: &Monomial) -> String {
        mono.powers()
            .iter()
            .map(|(symbol, exp)| self.power(&symbol.to_string(), *exp))
            .collect::<Vec<_>>()
            .join("*")
    }

    fn power(&self, base: &str, exp: u32) -> String {
        if exp > self.max_power {
            format!("pow({}, {})", base, exp)
        } else {
            vec![base; exp as usize].join("*")
        }
    }
}

fn coefficient(value: &BigRational) -> String {
    if value.is_integer() {
        value.to_string()
    } else {
        format!("{}.0/{}.0", value.numer(), value.denom())
    }
}
