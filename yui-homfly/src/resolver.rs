use log::{debug, info};
use num_traits::Pow;
use yui::{Ring, RingOps, Sign};
use yui::util::log::indent;
use yui_link::{locate_bad_crossing, reduce, BadCrossing, Braid, CompRecord, Transition};

use crate::cache::{Cache, CacheKey};
use crate::{Error, HomflyConfig, HomflyPoly};

// One node of the recursion, as it was visited.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TraceEntry {
    pub depth: usize,
    pub braid: Braid,
    pub record: CompRecord,
    pub basepoint: usize,
    pub bad: Option<BadCrossing>
}

/*
 * Skein resolution of P(L) with
 *
 *   a⁻¹P(L₊) - aP(L₋) = zP(L₀),  P(O) = 1.
 *
 * Each node looks for the first bad crossing. If there is none the closure is
 * an unlink of k components and P = δ^(k-1), δ = (a⁻¹ - a)z⁻¹. Otherwise the
 * crossing is flipped (good branch) and smoothed (smoothed branch), both are
 * reduced and resolved recursively.
 */
pub struct SkeinResolver<R = i64>
where R: Ring, for<'x> &'x R: RingOps<R> {
    config: HomflyConfig,
    a: HomflyPoly<R>,
    a_inv: HomflyPoly<R>,
    z: HomflyPoly<R>,
    delta: HomflyPoly<R>,
    nodes: usize,
    cache: Option<Cache<R>>,
    trace: Vec<TraceEntry>
}

impl<R> SkeinResolver<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(config: HomflyConfig) -> Self {
        let m = HomflyPoly::<R>::mono;
        let a = HomflyPoly::from(m(1, 0));
        let a_inv = HomflyPoly::from(m(-1, 0));
        let z = HomflyPoly::from(m(0, 1));
        let delta = HomflyPoly::from_iter([
            (m(-1, -1), R::one()),
            (m( 1, -1), -R::one())
        ]);
        let cache = if config.use_cache { Some(Cache::new()) } else { None };

        Self { config, a, a_inv, z, delta, nodes: 0, cache, trace: vec![] }
    }

    pub fn config(&self) -> &HomflyConfig {
        &self.config
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.as_ref().map(|c| c.hits()).unwrap_or(0)
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn take_trace(&mut self) -> Vec<TraceEntry> {
        std::mem::take(&mut self.trace)
    }

    pub fn delta(&self) -> &HomflyPoly<R> {
        &self.delta
    }

    // The HOMFLY polynomial of the closure of `braid`.
    pub fn compute(&mut self, braid: &Braid) -> Result<HomflyPoly<R>, Error> {
        let record = Transition::Create.apply(braid, &CompRecord::default(), 1)?;
        self.compute_from(braid, &record, record[0])
    }

    // Starts from a given record and basepoint, which are validated first.
    // The braid is reduced before the first resolution, so that no
    // destabilisable crossing ever reaches `homfly`.
    pub fn compute_from(&mut self, braid: &Braid, record: &CompRecord, basepoint: usize) -> Result<HomflyPoly<R>, Error> {
        if !self.config.virtual_mode && braid.has_virtual() {
            let e = yui_link::Error::MalformedBraid(
                format!("{braid} has virtual crossings, but virtual mode is off.")
            );
            return Err(e.into())
        }

        record.validate(braid, basepoint)?;

        info!("compute HOMFLY: {braid} ({} strands), record: {record}, basepoint: {basepoint}", braid.strands());

        let r = reduce(braid, record, basepoint)?;
        let res = self.homfly(&r.braid, &r.record, r.basepoint, 0)?;

        if let Some(cache) = self.cache.as_ref() {
            info!("nodes: {}, cached: {}, cache hits: {}", self.nodes, cache.len(), cache.hits());
        } else {
            info!("nodes: {}", self.nodes);
        }

        Ok(res)
    }

    pub fn homfly(&mut self, braid: &Braid, record: &CompRecord, basepoint: usize, depth: usize) -> Result<HomflyPoly<R>, Error> {
        self.guard(depth)?;

        let key = match self.cache {
            Some(_) => Some(CacheKey::canonical(braid, record, basepoint)?),
            None => None
        };

        if let (Some(cache), Some(key)) = (self.cache.as_mut(), key.as_ref()) {
            if let Some(res) = cache.get(key) {
                debug!("{}{braid} {record} @{basepoint}: (cached) {res}", indent(depth));
                return Ok(res)
            }
        }

        let bad = locate_bad_crossing(braid, record, basepoint)?;

        if self.config.record_trace {
            self.trace.push(TraceEntry {
                depth,
                braid: braid.clone(),
                record: record.clone(),
                basepoint,
                bad
            });
        }

        let res = match bad {
            None => {
                let k = record.len();
                let res = (&self.delta).pow(k.saturating_sub(1));

                debug!("{}{braid} {record} @{basepoint}: unlink of {k}, {res}", indent(depth));

                res
            },
            Some(BadCrossing { crossing, component }) => {
                let g = braid.elements()[crossing];
                let Some(sign) = g.ctype().sign() else {
                    let e = yui_link::Error::InvariantViolation(
                        format!("virtual crossing {g} at {crossing} reported as bad.")
                    );
                    return Err(e.into())
                };

                debug!("{}{braid} {record} @{basepoint}: bad {g} at {crossing}", indent(depth));

                let good = braid.flipped_at(crossing);
                let good = reduce(&good, record, basepoint)?;

                let smoothed = braid.removed(crossing);
                let s_record = Transition::SmoothedCrossing { component }.apply(&smoothed, record, basepoint)?;
                let smoothed = reduce(&smoothed, &s_record, basepoint)?;

                let p_good = self.homfly(&good.braid, &good.record, good.basepoint, depth + 1)?;
                let p_smth = self.homfly(&smoothed.braid, &smoothed.record, smoothed.basepoint, depth + 1)?;

                let res = self.combine(sign, &p_good, &p_smth);

                debug!("{}{braid}: {res}", indent(depth));

                res
            }
        };

        if let (Some(cache), Some(key)) = (self.cache.as_mut(), key) {
            cache.insert(key, res.clone());
        }

        Ok(res)
    }

    //  P(L₊) = a(aP(L₋) + zP(L₀)),
    //  P(L₋) = a⁻¹(a⁻¹P(L₊) - zP(L₀)).
    fn combine(&self, sign: Sign, good: &HomflyPoly<R>, smoothed: &HomflyPoly<R>) -> HomflyPoly<R> {
        let a = if sign.is_positive() { &self.a } else { &self.a_inv };
        let e = HomflyPoly::from_const(R::from_sign(sign));

        a * (a * good + &e * &self.z * smoothed)
    }

    fn guard(&mut self, depth: usize) -> Result<(), Error> {
        self.nodes += 1;

        if let Some(limit) = self.config.max_nodes {
            if self.nodes > limit {
                return Err(Error::ResourceExhausted { what: "resolver nodes", limit })
            }
        }
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(Error::ResourceExhausted { what: "recursion depth", limit })
            }
        }

        Ok(())
    }
}

impl<R> Default for SkeinResolver<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::new(HomflyConfig::default())
    }
}
