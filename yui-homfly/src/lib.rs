mod error;
mod config;
mod cache;
mod resolver;
mod virt;

pub use error::Error;
pub use config::HomflyConfig;
pub use resolver::{SkeinResolver, TraceEntry};
pub use virt::{virtual_homfly, Unverified};

use yui::poly::LPoly2;
use yui_link::Braid;

pub type HomflyPoly<R = i64> = LPoly2<'a', 'z', R>;

// The HOMFLY polynomial of the closure of `braid`, with the default configuration.
pub fn homfly(braid: &Braid) -> Result<HomflyPoly, Error> {
    SkeinResolver::new(HomflyConfig::default()).compute(braid)
}
