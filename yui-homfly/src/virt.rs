use std::fmt;
use itertools::Itertools;
use log::{info, warn};
use num_traits::One;
use yui::{Ring, RingOps};
use yui_link::{reduce, Braid, CompRecord, Transition};

use crate::{Error, HomflyConfig, HomflyPoly, SkeinResolver};

// A value computed by a method that is not known to give an invariant.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Unverified<T>(T);

impl<T> Unverified<T> {
    pub fn value(&self) -> &T {
        &self.0
    }

    pub fn into_unverified(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Unverified<T>
where T: fmt::Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Experimental extension to virtual braids: resolves the braid once for each
// ordering of its components, starting from the first one, and multiplies the
// results. It is not known whether this is an invariant of virtual links.
pub fn virtual_homfly<R>(braid: &Braid, config: &HomflyConfig) -> Result<Unverified<HomflyPoly<R>>, Error>
where R: Ring, for<'x> &'x R: RingOps<R> {
    warn!("virtual HOMFLY is experimental, the result is not an established invariant.");

    let config = HomflyConfig { virtual_mode: true, ..config.clone() };
    let mut resolver = SkeinResolver::<R>::new(config);

    let record = Transition::Create.apply(braid, &CompRecord::default(), 1)?;
    let r = reduce(braid, &record, record[0])?;
    let k = r.record.len();

    info!("virtual HOMFLY: {} ({} components, {} orderings)", r.braid, k, (1..=k).product::<usize>());

    let mut res = HomflyPoly::<R>::one();

    for perm in r.record.iter().cloned().permutations(k) {
        let record = CompRecord::from(perm);
        let basepoint = record[0];
        let p = resolver.homfly(&r.braid, &record, basepoint, 0)?;
        res *= p;
    }

    Ok(Unverified(res))
}

#[cfg(test)]
mod tests {
    use super::*;

    type P = HomflyPoly;

    #[test]
    fn does_not_crash() {
        for s in ["s1 t1 s1", "t1 s2 t1 -s2", "s1 s1 t1 s1", "t1 t2 s1 t2 -s1", "t1"] {
            let b: Braid = s.parse().unwrap();
            let res = virtual_homfly::<i64>(&b, &HomflyConfig::default());
            assert!(res.is_ok(), "{s}: {res:?}");
        }
    }

    #[test]
    fn classical_knot() {
        let b = Braid::from([1, 1, 1]);
        let res = virtual_homfly::<i64>(&b, &HomflyConfig::default()).unwrap();
        let expected = crate::homfly(&b).unwrap();
        assert_eq!(res.value(), &expected);
    }

    #[test]
    fn unverified_display() {
        let u = Unverified(P::one());
        assert_eq!(u.to_string(), "1");
        assert_eq!(u.into_unverified(), P::one());
    }
}
