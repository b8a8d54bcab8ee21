use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Error { 
    #[display("malformed braid: {_0}")]
    MalformedBraid(String),

    #[display("invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for Error {}

macro_rules! ensure {
    ($cond:expr, $kind:ident, $($arg:tt)*) => {{
        if !$cond { 
            return Err($crate::Error::$kind(format!($($arg)*)));
        }
    }}
}

pub(crate) use ensure;
