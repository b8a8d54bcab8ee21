mod var2;
mod lpoly2;

pub use var2::Var2;
pub use lpoly2::LPoly2;
