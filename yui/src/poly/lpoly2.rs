use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{AddAssign, SubAssign, MulAssign, Neg, Add, Sub, Mul};
use std::str::FromStr;
use ahash::AHashMap;
use auto_impl_ops::auto_ops;
use itertools::Itertools;
use num_traits::{One, Pow, Zero};
use regex::Regex;

use crate::{ParseError, Ring, RingOps};
use crate::util::format::lc;
use super::Var2;

// A Laurent polynomial in two variables X, Y over R, 
// stored as a linear combination of monomials `Var2<X, Y>`.
// Zero coefficients are never stored. 

#[derive(Clone, PartialEq, Eq)]
pub struct LPoly2<const X: char, const Y: char, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    data: AHashMap<Var2<X, Y>, R>
}

impl<const X: char, const Y: char, R> LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn new() -> Self { 
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let data = AHashMap::with_hasher(hasher);
        Self { data }
    }

    pub fn mono(i: isize, j: isize) -> Var2<X, Y> {
        Var2::from((i, j))
    }

    pub fn variable(i: usize) -> Self { 
        assert!(i < 2);
        let d = if i == 0 { (1, 0) } else { (0, 1) };
        Self::from(Var2::from(d))
    }

    pub fn from_const(r: R) -> Self {
        Self::from((Var2::one(), r))
    }

    pub fn nterms(&self) -> usize {
        self.data.len()
    }

    pub fn coeff(&self, x: &Var2<X, Y>) -> R { 
        self.data.get(x).cloned().unwrap_or_else(R::zero)
    }

    pub fn coeff_for(&self, i: isize, j: isize) -> R { 
        self.coeff(&Self::mono(i, j))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var2<X, Y>, &R)> + Clone {
        self.data.iter()
    }

    // terms in ascending order w.r.t. `Var2::cmp`.
    pub fn sorted_terms(&self) -> impl Iterator<Item = (&Var2<X, Y>, &R)> {
        self.data.iter().sorted_by_key(|(x, _)| *x)
    }

    pub fn is_mono(&self) -> bool { 
        self.nterms() == 1
    }

    pub fn is_const(&self) -> bool { 
        self.iter().all(|(x, _)| x.is_one())
    }

    // The inverse exists iff `self` is a single term with coefficient ±1.
    pub fn inv(&self) -> Option<Self> { 
        if !self.is_mono() { 
            return None
        }
        let (x, r) = self.iter().next()?;
        if r.is_pm_one() { 
            Some(Self::from((x.inv(), r.clone())))
        } else { 
            None
        }
    }

    pub fn map_coeffs<R2, F>(&self, f: F) -> LPoly2<X, Y, R2>
    where 
        R2: Ring, for<'x> &'x R2: RingOps<R2>, 
        F: Fn(&R) -> R2
    {
        self.iter().map(|(x, r)| (*x, f(r))).collect()
    }

    // Substitutes X ↦ X^{-1}, Y ↦ -Y. 
    // Mirroring a link acts on its HOMFLY polynomial this way.
    pub fn mirror(&self) -> Self { 
        self.iter().map(|(x, r)| { 
            let (i, j) = x.deg();
            let r = if j % 2 == 0 { r.clone() } else { -r };
            (Self::mono(-i, j), r)
        }).collect()
    }

    // Compact form, parsable by `from_str`. e.g. `a^-1z^-1-az^-1`.
    pub fn to_ascii(&self) -> String { 
        if self.data.is_empty() { 
            return "0".to_string()
        }

        let mut res = String::new();
        for (i, (x, r)) in self.sorted_terms().enumerate() { 
            let r = r.to_string();
            let (neg, r) = match r.strip_prefix('-') { 
                Some(r) => (true, r),
                None    => (false, r.as_str())
            };

            if neg { 
                res.push('-')
            } else if i > 0 { 
                res.push('+')
            }

            if x.is_one() { 
                res.push_str(r)
            } else { 
                if r != "1" { 
                    res.push_str(r)
                }
                res.push_str(&x.to_ascii())
            }
        }
        res
    }

    fn add_term(&mut self, x: Var2<X, Y>, r: R) { 
        if r.is_zero() { 
            return
        }
        let entry = self.data.entry(x).or_insert_with(R::zero);
        *entry += r;
        if entry.is_zero() { 
            self.data.remove(&x);
        }
    }
}

impl<const X: char, const Y: char, R> Default for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const X: char, const Y: char, R> From<Var2<X, Y>> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(x: Var2<X, Y>) -> Self {
        Self::from((x, R::one()))
    }
}

impl<const X: char, const Y: char, R> From<(Var2<X, Y>, R)> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(pair: (Var2<X, Y>, R)) -> Self {
        Self::from_iter([pair])
    }
}

impl<const X: char, const Y: char, R> From<i32> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(a: i32) -> Self {
        Self::from_const(R::from(a))
    }
}

impl<const X: char, const Y: char, R> FromIterator<(Var2<X, Y>, R)> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from_iter<T: IntoIterator<Item = (Var2<X, Y>, R)>>(iter: T) -> Self {
        let mut res = Self::new();
        for (x, r) in iter { 
            res.add_term(x, r);
        }
        res
    }
}

// Accepts sums of terms `[+-] [coeff][*] [X[^i]][Y[^j]]`, 
// e.g. `a^-1z^-1-az^-1`, `2a^2 - a^4 + a^2z^2`, `-3`.
impl<const X: char, const Y: char, R> FromStr for LPoly2<X, Y, R>
where R: Ring + FromStr, for<'x> &'x R: RingOps<R> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if input.is_empty() { 
            return Err(ParseError::new(s, "empty input"))
        }
        if input == "0" { 
            return Ok(Self::zero())
        }

        let p = format!(r"^([+-]?)([0-9]*)\*?({})", Var2::<X, Y>::pattern());
        let r = Regex::new(&p).map_err(|e| ParseError::new(s, e.to_string()))?;

        let mut res = Self::new();
        let mut rest = input.as_str();

        while !rest.is_empty() { 
            let Some(c) = r.captures(rest) else { 
                return Err(ParseError::new(s, format!("unexpected '{rest}'")))
            };

            let (sign, coeff, mono) = (&c[1], &c[2], &c[3]);
            let is_head = rest.len() == input.len();

            if coeff.is_empty() && mono.is_empty() { 
                return Err(ParseError::new(s, format!("missing term at '{rest}'")))
            }
            if sign.is_empty() && !is_head { 
                return Err(ParseError::new(s, format!("missing operator at '{rest}'")))
            }

            let r = if coeff.is_empty() { 
                R::one()
            } else { 
                R::from_str(coeff).map_err(|_| 
                    ParseError::new(s, format!("invalid coefficient '{coeff}'"))
                )?
            };
            let r = if sign == "-" { -r } else { r };
            let x = if mono.is_empty() { 
                Var2::one()
            } else { 
                Var2::from_str(mono)?
            };

            res.add_term(x, r);
            rest = &rest[c[0].len()..];
        }

        Ok(res)
    }
}

impl<const X: char, const Y: char, R> Display for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&lc(self.sorted_terms()))
    }
}

impl<const X: char, const Y: char, R> Debug for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<const X: char, const Y: char, R> Zero for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl<const X: char, const Y: char, R> One for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn one() -> Self {
        Self::from_const(R::one())
    }

    fn is_one(&self) -> bool {
        self.is_mono() && self.coeff(&Var2::one()).is_one()
    }
}

impl<const X: char, const Y: char, R> Neg for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.data.into_iter().map(|(x, r)| (x, -r)).collect()
    }
}

impl<const X: char, const Y: char, R> Neg for &LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = LPoly2<X, Y, R>;
    fn neg(self) -> Self::Output {
        self.iter().map(|(x, r)| (*x, -r)).collect()
    }
}

#[auto_ops]
impl<const X: char, const Y: char, R> AddAssign<&LPoly2<X, Y, R>> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn add_assign(&mut self, rhs: &LPoly2<X, Y, R>) {
        for (x, r) in rhs.iter() { 
            self.add_term(*x, r.clone());
        }
    }
}

#[auto_ops]
impl<const X: char, const Y: char, R> SubAssign<&LPoly2<X, Y, R>> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sub_assign(&mut self, rhs: &LPoly2<X, Y, R>) {
        for (x, r) in rhs.iter() { 
            self.add_term(*x, -r);
        }
    }
}

#[auto_ops]
impl<const X: char, const Y: char, R> MulAssign<&LPoly2<X, Y, R>> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn mul_assign(&mut self, rhs: &LPoly2<X, Y, R>) {
        let mut res = Self::new();
        for ((x, r), (y, s)) in self.iter().cartesian_product(rhs.iter()) { 
            res.add_term(x * y, r * s);
        }
        *self = res;
    }
}

impl<const X: char, const Y: char, R> Sum for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut res, p| { 
            res += p;
            res
        })
    }
}

impl<'a, const X: char, const Y: char, R> Sum<&'a Self> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut res, p| { 
            res += p;
            res
        })
    }
}

impl<const X: char, const Y: char, R> Pow<usize> for &LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = LPoly2<X, Y, R>;
    fn pow(self, n: usize) -> Self::Output {
        let mut res = LPoly2::one();
        for _ in 0..n { 
            res *= self
        }
        res
    }
}

impl<const X: char, const Y: char, R> Pow<usize> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn pow(self, n: usize) -> Self::Output {
        (&self).pow(n)
    }
}

impl<const X: char, const Y: char, R> RingOps<Self> for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<const X: char, const Y: char, R> RingOps<LPoly2<X, Y, R>> for &LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<const X: char, const Y: char, R> Ring for LPoly2<X, Y, R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn math_symbol() -> String {
        format!("{}[{X}±, {Y}±]", R::math_symbol())
    }
}
