mod abst;
mod sign;

pub use abst::*;
pub use sign::*;

pub mod poly;
pub mod util;
