use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{DivAssign, MulAssign, Div, Mul};
use std::str::FromStr;
use auto_impl_ops::auto_ops;
use itertools::Itertools;
use num_traits::{One, Pow, Zero};
use regex::Regex;

use crate::ParseError;
use crate::util::format::superscript;

// `Var2<X, Y>` : represents Laurent monomials X^i Y^j (i, j ∈ Z).

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Var2<const X: char, const Y: char>(
    isize, isize
);

impl<const X: char, const Y: char> Var2<X, Y> {
    pub fn var_symbol(i: usize) -> char { 
        assert!(i < 2);
        if i == 0 { X } else { Y }
    }

    pub fn deg(&self) -> (isize, isize) { 
        (self.0, self.1)
    }

    pub fn inv(&self) -> Self { // (x^i y^j)^{-1} = x^{-i} y^{-j}
        Self(-self.0, -self.1)
    }

    pub fn to_ascii(&self) -> String { 
        self.fmt_impl(false)
    }

    fn fmt_impl(&self, unicode: bool) -> String { 
        let s = [(X, self.0), (Y, self.1)].into_iter().map(|(x, d)|
            fmt_mono(x, d, unicode)
        ).filter(|s| s != "1").join("");

        if s.is_empty() { 
            "1".to_string()
        } else { 
            s
        }
    }

    // matches a (possibly empty) monomial at the head of `s`.
    pub(crate) fn pattern() -> String { 
        format!(r"(?:{X}(?:\^-?[0-9]+)?)?(?:{Y}(?:\^-?[0-9]+)?)?")
    }
}

fn fmt_mono(x: char, d: isize, unicode: bool) -> String { 
    if d.is_zero() { 
        "1".to_string()
    } else if d.is_one() { 
        x.to_string()
    } else if unicode { 
        format!("{x}{}", superscript(d))
    } else { 
        format!("{x}^{d}")
    }
}

impl<const X: char, const Y: char> From<(isize, isize)> for Var2<X, Y> {
    fn from(d: (isize, isize)) -> Self {
        Self(d.0, d.1)
    }
}

impl<const X: char, const Y: char> FromStr for Var2<X, Y> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "1" { 
            return Ok(Self::one())
        }

        if s.is_empty() { 
            return Err(ParseError::new(s, "empty monomial"))
        }

        let r = Regex::new(&format!(r"^({X}(\^(-?[0-9]+))?)?({Y}(\^(-?[0-9]+))?)?$"))
            .map_err(|e| ParseError::new(s, e.to_string()))?;

        let Some(c) = r.captures(s) else { 
            return Err(ParseError::new(s, "not a monomial"))
        };

        let deg = |all: usize, exp: usize| -> Result<isize, ParseError> { 
            match (c.get(all), c.get(exp)) { 
                (None, _) => Ok(0),
                (Some(_), None) => Ok(1),
                (Some(_), Some(e)) => isize::from_str(e.as_str()).map_err(|e| 
                    ParseError::new(s, e.to_string())
                )
            }
        };

        Ok(Self(deg(1, 3)?, deg(4, 6)?))
    }
}

impl<const X: char, const Y: char> One for Var2<X, Y> {
    fn one() -> Self {
        Self(0, 0) // x^0 y^0 = 1.
    }

    fn is_one(&self) -> bool { 
        self.0 == 0 && self.1 == 0
    }
}

#[auto_ops]
impl<const X: char, const Y: char> MulAssign<&Var2<X, Y>> for Var2<X, Y> {
    fn mul_assign(&mut self, rhs: &Var2<X, Y>) {
        self.0 += rhs.0; // x^i * x^j = x^{i+j}
        self.1 += rhs.1;
    }
}

#[auto_ops]
impl<const X: char, const Y: char> DivAssign<&Var2<X, Y>> for Var2<X, Y> {
    fn div_assign(&mut self, rhs: &Var2<X, Y>) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
    }
}

impl<const X: char, const Y: char> Pow<isize> for Var2<X, Y> {
    type Output = Self;

    fn pow(self, n: isize) -> Self {
        Self(self.0 * n, self.1 * n)
    }
}

// Terms are ordered by the degree of Y first, then of X.
impl<const X: char, const Y: char> PartialOrd for Var2<X, Y> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl<const X: char, const Y: char> Ord for Var2<X, Y> {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.1, &other.1).then_with(|| 
            Ord::cmp(&self.0, &other.0)
        )
    }
}

impl<const X: char, const Y: char> Display for Var2<X, Y> { 
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fmt_impl(true))
    }
}

impl<const X: char, const Y: char> Debug for Var2<X, Y> { 
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
