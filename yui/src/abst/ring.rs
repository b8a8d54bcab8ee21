use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::Sign;

// Commutative rings with exact arithmetic.
// Operations are required both for owned values and references. 

pub trait RingOps<T = Self>: 
    Sized + 
    Add<T, Output = T> + 
    for<'a> Add<&'a T, Output = T> + 
    Sub<T, Output = T> + 
    for<'a> Sub<&'a T, Output = T> + 
    Mul<T, Output = T> + 
    for<'a> Mul<&'a T, Output = T> + 
    Neg<Output = T>
{}

pub trait Ring: 
    Default + 
    PartialEq + 
    Eq + 
    Clone + 
    Send + 
    Sync + 
    Display + 
    Debug + 
    'static +
    RingOps + 
    Zero + 
    One + 
    AddAssign + 
    for<'a> AddAssign<&'a Self> + 
    SubAssign + 
    for<'a> SubAssign<&'a Self> + 
    MulAssign + 
    for<'a> MulAssign<&'a Self> + 
    Sum<Self> + 
    for<'a> Sum<&'a Self> + 
    From<i32>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn math_symbol() -> String;

    fn is_pm_one(&self) -> bool { 
        self.is_one() || (-self).is_one()
    }

    fn from_sign(s: Sign) -> Self { 
        Self::from(i32::from(s))
    }
}

macro_rules! impl_ring {
    ($t:ty, $symbol:literal) => {
        impl RingOps<$t> for $t {}
        impl<'a> RingOps<$t> for &'a $t {}

        impl Ring for $t { 
            fn math_symbol() -> String { 
                String::from($symbol)
            }
        }
    };
}

impl_ring!(i32, "Z");
impl_ring!(i64, "Z");
impl_ring!(i128, "Z");
impl_ring!(BigInt, "Z");
