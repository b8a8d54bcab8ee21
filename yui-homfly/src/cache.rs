use ahash::AHashMap;
use yui::{Ring, RingOps};
use yui_link::{Braid, CompRecord, Generator, Transition};

use crate::HomflyPoly;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct CacheKey {
    strands: usize,
    word: Vec<Generator>,
    record: CompRecord,
    basepoint: usize
}

impl CacheKey {
    pub fn exact(braid: &Braid, record: &CompRecord, basepoint: usize) -> Self {
        Self {
            strands: braid.strands(),
            word: braid.elements().to_vec(),
            record: record.clone(),
            basepoint
        }
    }

    // Classical closures are invariant under conjugation, so the word is
    // rotated to its least rotation and the record and basepoint are carried
    // to the corresponding level. Virtual words are kept as they are.
    pub fn canonical(braid: &Braid, record: &CompRecord, basepoint: usize) -> Result<Self, yui_link::Error> {
        if braid.has_virtual() || braid.len() < 2 {
            return Ok(Self::exact(braid, record, basepoint))
        }

        let k = (0..braid.len()).min_by(|&i, &j|
            Self::rotated_word(braid, i).cmp(Self::rotated_word(braid, j))
        ).unwrap_or(0);

        if k == 0 {
            return Ok(Self::exact(braid, record, basepoint))
        }

        let record = Transition::ResetToCrossing { crossing: k }.apply(braid, record, basepoint)?;
        let basepoint = braid.level_position(basepoint, k);

        Ok(Self::exact(&braid.rotated(k), &record, basepoint))
    }

    fn rotated_word(braid: &Braid, k: usize) -> impl Iterator<Item = &Generator> {
        let e = braid.elements();
        e[k..].iter().chain(e[..k].iter())
    }
}

pub(crate) struct Cache<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    data: AHashMap<CacheKey, HomflyPoly<R>>,
    hits: usize
}

impl<R> Cache<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new() -> Self {
        Self { data: AHashMap::new(), hits: 0 }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<HomflyPoly<R>> {
        let res = self.data.get(key).cloned();
        if res.is_some() {
            self.hits += 1;
        }
        res
    }

    pub fn insert(&mut self, key: CacheKey, value: HomflyPoly<R>) {
        self.data.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}
