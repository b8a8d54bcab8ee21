mod error;
mod braid;
mod trace;
mod record;
mod locate;
mod reduce;

pub use error::Error;
pub use braid::{Braid, Generator, CrossingType};
pub use trace::{Trace, Step};
pub use record::{CompRecord, Transition};
pub use locate::{locate_bad_crossing, BadCrossing};
pub use reduce::{reduce, Reduced};
