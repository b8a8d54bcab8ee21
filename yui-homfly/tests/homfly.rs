use num_bigint::BigInt;
use yui_homfly::{homfly, virtual_homfly, Error, HomflyConfig, HomflyPoly, SkeinResolver};
use yui_link::{Braid, CompRecord};

type P = HomflyPoly;

fn poly(s: &str) -> P {
    s.parse().unwrap()
}

fn braids() -> Vec<Braid> {
    vec![
        Braid::from([1, 1]),
        Braid::from([1, 1, 1]),
        Braid::from([1, -2, 1, -2]),
        Braid::from([1, 1, 1, 1, 1]),
        Braid::from([1, 1, 2, -1, 2]),
        Braid::from([1, 2, 1, 2, 1, 2]),
        Braid::from([1, -2, 3, -2, 1, 3]),
    ]
}

#[test]
fn unknot() {
    assert_eq!(homfly(&Braid::id(1)).unwrap(), poly("1"));
    assert_eq!(homfly(&Braid::from([1])).unwrap(), poly("1"));
    assert_eq!(homfly(&Braid::from([1, -1, 1])).unwrap(), poly("1"));
    assert_eq!(homfly(&Braid::from([1, 2, -3])).unwrap(), poly("1"));
}

#[test]
fn unlink() {
    let delta = poly("a^-1z^-1 - az^-1");
    assert_eq!(homfly(&Braid::id(2)).unwrap(), delta);
    assert_eq!(homfly(&Braid::from([1, -1])).unwrap(), delta);
    assert_eq!(homfly(&Braid::id(3)).unwrap(), &delta * &delta);
}

#[test]
fn hopf_link() {
    let p = homfly(&Braid::from([1, 1])).unwrap();
    assert_eq!(p, poly("az^-1 - a^3z^-1 + az"));
}

#[test]
fn trefoil() {
    let p = homfly(&Braid::from([1, 1, 1])).unwrap();
    assert_eq!(p, poly("2a^2 - a^4 + a^2z^2"));
    assert_eq!(p.to_string(), "2a² - a⁴ + a²z²");
}

#[test]
fn mirror_trefoil() {
    let p = homfly(&Braid::from([-1, -1, -1])).unwrap();
    assert_eq!(p, poly("2a^-2 - a^-4 + a^-2z^2"));
}

#[test]
fn figure_eight() {
    let p = homfly(&Braid::from([1, -2, 1, -2])).unwrap();
    assert_eq!(p, poly("a^-2 - 1 + a^2 - z^2"));
}

#[test]
fn cinquefoil() {
    let p = homfly(&Braid::from([1, 1, 1, 1, 1])).unwrap();
    assert_eq!(p, poly("3a^4 - 2a^6 + 4a^4z^2 - a^6z^2 + a^4z^4"));
}

#[test]
fn mirror() {
    for b in braids() {
        let p = homfly(&b).unwrap();
        let q = homfly(&b.mirror()).unwrap();
        assert_eq!(q, p.mirror(), "{b}");
    }
}

#[test]
fn conjugation() {
    for b in braids() {
        let p = homfly(&b).unwrap();
        for k in 1..b.len() {
            assert_eq!(homfly(&b.rotated(k)).unwrap(), p, "{b} rotated by {k}");
        }
    }
}

#[test]
fn stabilisation() {
    let b = Braid::from([1, -2, 1, -2]);
    let p = homfly(&b).unwrap();

    let s = Braid::from([1, -2, 1, -2, -3]);
    assert_eq!(homfly(&s).unwrap(), p);
}

#[test]
fn skein_identity() {
    let (a, z) = (poly("a"), poly("z"));
    let a_inv = poly("a^-1");

    for b in braids() {
        for k in 0..b.len() {
            let plus = if b.elements()[k].ctype() == yui_link::CrossingType::Pos {
                b.clone()
            } else {
                b.flipped_at(k)
            };
            let minus = plus.flipped_at(k);
            let zero = plus.removed(k);

            let p_plus  = homfly(&plus).unwrap();
            let p_minus = homfly(&minus).unwrap();
            let p_zero  = homfly(&zero).unwrap();

            assert_eq!(&a_inv * &p_plus - &a * &p_minus, &z * &p_zero, "{b} at {k}");
        }
    }
}

#[test]
fn record_order() {
    let b = Braid::from([1, 1, 2, 2]);
    let p = homfly(&b).unwrap();

    let mut s = SkeinResolver::<i64>::default();
    for (r, bp) in [([1, 2, 3], 1), ([2, 1, 3], 2), ([3, 2, 1], 3), ([2, 3, 1], 2)] {
        let r = CompRecord::from(r);
        assert_eq!(s.compute_from(&b, &r, bp).unwrap(), p);
    }
}

#[test]
fn determinism() {
    let config = HomflyConfig { record_trace: true, ..Default::default() };

    for b in braids() {
        let mut s1 = SkeinResolver::<i64>::new(config.clone());
        let mut s2 = SkeinResolver::<i64>::new(config.clone());

        let p1 = s1.compute(&b).unwrap();
        let p2 = s2.compute(&b).unwrap();

        assert_eq!(p1, p2);
        assert_eq!(s1.trace(), s2.trace());
        assert_eq!(s1.trace().len(), s1.nodes());
        assert!(s1.trace().iter().all(|e| e.record.validate(&e.braid, e.basepoint).is_ok()));
    }
}

#[test]
fn cache() {
    let config = HomflyConfig { use_cache: true, ..Default::default() };

    for b in braids() {
        let mut s = SkeinResolver::<i64>::new(config.clone());
        let p = s.compute(&b).unwrap();
        assert_eq!(p, homfly(&b).unwrap(), "{b}");

        // a second run is answered from the cache.
        let q = s.compute(&b).unwrap();
        assert_eq!(q, p);
        assert!(s.cache_hits() > 0);
    }
}

#[test]
fn resource_guard() {
    let config = HomflyConfig { max_nodes: Some(10), ..Default::default() };
    let mut s = SkeinResolver::<i64>::new(config);
    let res = s.compute(&Braid::from([1, 2, 1, 2, 1, 2]));
    assert!(matches!(res, Err(Error::ResourceExhausted { limit: 10, .. })));

    let config = HomflyConfig { max_depth: Some(2), ..Default::default() };
    let mut s = SkeinResolver::<i64>::new(config);
    let res = s.compute(&Braid::from([1, 1, 1, 1, 1]));
    assert!(matches!(res, Err(Error::ResourceExhausted { limit: 2, .. })));
}

#[test]
fn bigint_coeffs() {
    let b = Braid::from([1, 2, 1, 2, 1, 2]);
    let p = homfly(&b).unwrap();

    let mut s = SkeinResolver::<BigInt>::default();
    let q = s.compute(&b).unwrap();
    assert_eq!(q, p.map_coeffs(|&c| BigInt::from(c)));
}

#[test]
fn virtual_does_not_crash() {
    for s in ["s1 t1 s1 t1", "t1 s2 t1 -s2 s2", "s1 t2 s1 t2 s1", "t1 t1 s1 s1"] {
        let b: Braid = s.parse().unwrap();
        let res = virtual_homfly::<i64>(&b, &HomflyConfig::default());
        assert!(res.is_ok(), "{s}");

        let config = HomflyConfig { use_cache: true, ..Default::default() };
        let res = virtual_homfly::<i64>(&b, &config);
        assert!(res.is_ok(), "{s}");
    }
}
