use std::ops::{Mul, Neg};
use derive_more::{Display, Debug};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Debug)]
#[repr(i8)]
pub enum Sign { 
    #[default]
    #[display("+")]
    #[debug("+")]
    Pos = 1,

    #[display("-")]
    #[debug("-")]
    Neg = -1
}

impl Sign { 
    pub fn is_positive(&self) -> bool { 
        self == &Sign::Pos
    }

    pub fn is_negative(&self) -> bool { 
        !self.is_positive()
    }
}

macro_rules! impl_int_conversion {
    ($t:tt) => {
        impl TryFrom<$t> for Sign {
            type Error = $t;
            fn try_from(value: $t) -> Result<Self, $t> {
                match value { 
                     1 => Ok(Sign::Pos),
                    -1 => Ok(Sign::Neg),
                     _ => Err(value)
                }
            }
        }
        
        impl From<Sign> for $t {
            fn from(value: Sign) -> Self {
                match value { 
                    Sign::Pos =>  1,
                    Sign::Neg => -1
                }
            }
        }                
    };
}

impl_int_conversion!(i8);
impl_int_conversion!(i32);
impl_int_conversion!(i64);
impl_int_conversion!(isize);

impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self {
        use Sign::*;
        match self { 
            Neg => Pos,
            Pos => Neg
        }
    }
}

impl Mul for Sign {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self == rhs { 
            Sign::Pos
        } else { 
            Sign::Neg
        }
    }
}
