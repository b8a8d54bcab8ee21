mod ring;
mod err;

pub use ring::*;
pub use err::*;
