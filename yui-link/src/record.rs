use std::fmt;
use std::ops::Index;
use itertools::Itertools;
use log::trace;

use crate::braid::Braid;
use crate::error::{ensure, Error};
use crate::trace::Trace;

// One entry per component of the closure, in a fixed order: the lowest
// position (at the top of the braid) occupied by that component.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct CompRecord(Vec<usize>);

impl CompRecord {
    pub fn create(braid: &Braid) -> Self {
        let n = braid.strands();
        let mut visited = vec![false; n + 1];
        let mut entries = vec![];

        for s in 1..=n {
            if visited[s] {
                continue
            }
            for p in Trace::new(braid, s, 0).strands() {
                visited[p] = true;
            }
            entries.push(s);
        }

        Self(entries)
    }

    pub fn entries(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    // the index of the component on which `strand` (a top position) lies.
    pub fn component_index(&self, braid: &Braid, strand: usize) -> Option<usize> {
        self.0.iter().position(|&e|
            e <= braid.strands() && Trace::new(braid, e, 0).strands().contains(&strand)
        )
    }

    // Checks that the record lists every component exactly once, by its
    // lowest position, and that the basepoint lies on the first component.
    pub fn validate(&self, braid: &Braid, basepoint: usize) -> Result<(), Error> {
        let n = braid.strands();
        let mut owner = vec![None; n + 1];

        for (i, &e) in self.0.iter().enumerate() {
            ensure!(
                (1..=n).contains(&e),
                MalformedBraid,
                "record entry {e} is out of range for {n} strands."
            );
            ensure!(
                owner[e].is_none(),
                MalformedBraid,
                "record entries {} and {e} lie on the same component.", self.0[owner[e].unwrap_or(i)]
            );

            let comp = Trace::new(braid, e, 0).strands();
            let min = comp.iter().min().copied().unwrap_or(e);
            ensure!(
                min == e,
                MalformedBraid,
                "record entry {e} is not the lowest strand of its component (found {min})."
            );

            for p in comp {
                owner[p] = Some(i);
            }
        }

        let missing = (1..=n).filter(|&p| owner[p].is_none()).collect_vec();
        ensure!(
            missing.is_empty(),
            MalformedBraid,
            "record {self} has {} entries, but strands {missing:?} are on no listed component.", self.len()
        );
        ensure!(
            (1..=n).contains(&basepoint) && owner[basepoint] == Some(0),
            MalformedBraid,
            "basepoint {basepoint} does not lie on the first component of {self}."
        );

        Ok(())
    }
}

impl Index<usize> for CompRecord {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<usize>> for CompRecord {
    fn from(entries: Vec<usize>) -> Self {
        Self(entries)
    }
}

impl<const N: usize> From<[usize; N]> for CompRecord {
    fn from(entries: [usize; N]) -> Self {
        Self(entries.to_vec())
    }
}

impl fmt::Display for CompRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

// The structural edits a record has to follow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Transition {
    // build the record from scratch, components ordered by their lowest strand.
    Create,

    // a crossing found bad on the given component was removed.
    // applied to the braid after the removal.
    SmoothedCrossing { component: usize },

    // re-express every entry at the level just above the given term.
    ResetToCrossing { crossing: usize },

    // the given term is a Markov destabilisation deleting one strand.
    // applied to the braid before the removal.
    UntwistCrossing { crossing: usize },

    // an inverse pair σ_g^{±1} .. σ_g^{∓1} at the ends of the word is cancelled.
    // applied to the braid before the removal.
    InversePair { strand: usize },
}

impl Transition {
    pub fn apply(&self, braid: &Braid, record: &CompRecord, basepoint: usize) -> Result<CompRecord, Error> {
        let res = match *self {
            Transition::Create =>
                Ok(CompRecord::create(braid)),
            Transition::SmoothedCrossing { component } =>
                smoothed(braid, record, basepoint, component),
            Transition::ResetToCrossing { crossing } =>
                reset(braid, record, crossing),
            Transition::UntwistCrossing { crossing } =>
                untwist(braid, record, crossing),
            Transition::InversePair { strand } =>
                inverse_pair(braid, record, strand),
        }?;

        trace!("{self:?}: {record} -> {res} on {braid}");

        Ok(res)
    }
}

fn smoothed(braid: &Braid, record: &CompRecord, basepoint: usize, component: usize) -> Result<CompRecord, Error> {
    let n = braid.strands();
    let mut owner: Vec<Option<usize>> = vec![None; n + 1];
    let mut res: Vec<usize> = vec![];

    for &e in record.iter() {
        ensure!(
            (1..=n).contains(&e),
            InvariantViolation,
            "record entry {e} is out of range for {n} strands."
        );

        if let Some(j) = owner[e] {
            // fused into an earlier component.
            res[j] = res[j].min(e);
            continue
        }

        let j = res.len();
        for p in Trace::new(braid, e, 0).strands() {
            owner[p] = Some(j);
        }
        res.push(e);
    }

    let mut leftovers = vec![];
    for s in 1..=n {
        if owner[s].is_some() {
            continue
        }
        let comp = Trace::new(braid, s, 0).strands();
        for &p in comp.iter() {
            owner[p] = Some(usize::MAX);
        }
        leftovers.push(comp);
    }

    ensure!(
        leftovers.len() <= 1,
        InvariantViolation,
        "smoothing one crossing left {} new components.", leftovers.len()
    );

    if let Some(comp) = leftovers.pop() {
        let min = comp.iter().min().copied().unwrap_or(0);

        if comp.contains(&basepoint) {
            ensure!(
                component == 0 && !res.is_empty(),
                InvariantViolation,
                "basepoint {basepoint} moved off the first component while splitting component {component}."
            );
            let old = res[0];
            res[0] = min;
            res.push(old);
        } else {
            res.push(min);
        }
    }

    Ok(CompRecord(res))
}

fn reset(braid: &Braid, record: &CompRecord, k: usize) -> Result<CompRecord, Error> {
    ensure!(
        k < braid.len() || k == 0,
        InvariantViolation,
        "crossing {k} is out of range for a word of length {}.", braid.len()
    );

    let n = braid.strands();
    for &e in record.iter() {
        ensure!(
            (1..=n).contains(&e),
            InvariantViolation,
            "record entry {e} is out of range for {n} strands."
        );
    }

    let res = record.iter().map(|&e| {
        let p = braid.level_position(e, k);
        Trace::new(braid, p, k).strands().into_iter().min().unwrap_or(p)
    }).collect();

    Ok(CompRecord(res))
}

fn untwist(braid: &Braid, record: &CompRecord, k: usize) -> Result<CompRecord, Error> {
    let Some(doomed) = braid.destabilizing_strand(k) else {
        return Err(Error::InvariantViolation(
            format!("term {k} of {braid} is not a destabilisation.")
        ))
    };

    let res = record.iter().map(|&e|
        untwist_strand(braid, doomed, e)
    ).try_collect()?;

    Ok(CompRecord(res))
}

// The new number of the top position `strand` once position `doomed` is deleted.
// The doomed position itself is replaced by the lowest other position of its component.
pub(crate) fn untwist_strand(braid: &Braid, doomed: usize, strand: usize) -> Result<usize, Error> {
    let s = if strand == doomed {
        let other = Trace::new(braid, doomed, 0).strands().into_iter().filter(|&p|
            p != doomed
        ).min();

        let Some(other) = other else {
            return Err(Error::InvariantViolation(
                format!("strand {doomed} is a whole component and cannot be untwisted.")
            ))
        };
        other
    } else {
        strand
    };

    Ok(if s > doomed { s - 1 } else { s })
}

fn inverse_pair(braid: &Braid, record: &CompRecord, g: usize) -> Result<CompRecord, Error> {
    ensure!(
        g >= 1 && g < braid.strands(),
        InvariantViolation,
        "no generator {g} on {} strands.", braid.strands()
    );

    let same = Trace::new(braid, g, 0).strands().contains(&(g + 1));
    if same {
        return Ok(record.clone())
    }

    let res = record.iter().map(|&e|
        if e == g {
            g + 1
        } else if e == g + 1 {
            g
        } else {
            e
        }
    ).collect();

    Ok(CompRecord(res))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create() {
        let b = Braid::from([1, 1]);
        assert_eq!(CompRecord::create(&b), CompRecord::from([1, 2]));

        let b = Braid::from([1, 1, 1]);
        assert_eq!(CompRecord::create(&b), CompRecord::from([1]));

        let b = Braid::from([2, 2]).with_strands(4).unwrap();
        assert_eq!(CompRecord::create(&b), CompRecord::from([1, 2, 3, 4]));

        let b = Braid::from([1, -2, 1, -2]);
        assert_eq!(CompRecord::create(&b), CompRecord::from([1]));
    }

    #[test]
    fn create_idempotent() {
        for b in [Braid::from([1, 1]), Braid::from([1, 2, 1, 2, 1, 2]), Braid::from([2, 3, -2, 1, 1])] {
            let r = CompRecord::create(&b);
            let r2 = Transition::Create.apply(&b, &r, r[0]).unwrap();
            assert_eq!(r, r2);
            assert!(r.validate(&b, r[0]).is_ok());
        }
    }

    #[test]
    fn validate() {
        let b = Braid::from([1, 1]);
        assert!(CompRecord::from([1, 2]).validate(&b, 1).is_ok());
        assert!(CompRecord::from([2, 1]).validate(&b, 2).is_ok());
        assert!(CompRecord::from([1]).validate(&b, 1).is_err());
        assert!(CompRecord::from([1, 2]).validate(&b, 2).is_err());
        assert!(CompRecord::from([1, 3]).validate(&b, 1).is_err());

        let b = Braid::from([1, 1, 1]);
        assert!(CompRecord::from([1, 2]).validate(&b, 1).is_err());
        assert!(CompRecord::from([2]).validate(&b, 2).is_err());
    }

    #[test]
    fn component_index() {
        let b = Braid::from([1, 1]).with_strands(3).unwrap();
        let r = CompRecord::from([3, 1, 2]);
        assert_eq!(r.component_index(&b, 1), Some(1));
        assert_eq!(r.component_index(&b, 3), Some(0));
    }

    #[test]
    fn smoothed_fuse() {
        // Hopf link, smoothing one crossing fuses the two components.
        let b = Braid::from([1, 1]);
        let r = CompRecord::from([2, 1]);
        let s = b.removed(0);
        let r2 = Transition::SmoothedCrossing { component: 0 }.apply(&s, &r, 2).unwrap();
        assert_eq!(r2, CompRecord::from([1]));
        assert!(r2.validate(&s, 2).is_ok());
    }

    #[test]
    fn smoothed_fuse_later() {
        // σ₂σ₂ on 3 strands, smoothing fuses the components of 2 and 3.
        // the entry listed later is dropped and the lower strand is kept.
        let b = Braid::from([2, 2]).with_strands(3).unwrap();
        let s = b.removed(0);

        let r = CompRecord::from([1, 3, 2]);
        let r2 = Transition::SmoothedCrossing { component: 1 }.apply(&s, &r, 1).unwrap();
        assert_eq!(r2, CompRecord::from([1, 2]));
        assert!(r2.validate(&s, 1).is_ok());

        let r = CompRecord::from([1, 2, 3]);
        let r2 = Transition::SmoothedCrossing { component: 1 }.apply(&s, &r, 1).unwrap();
        assert_eq!(r2, CompRecord::from([1, 2]));
    }

    #[test]
    fn smoothed_split() {
        // trefoil, smoothing one crossing splits the knot into a Hopf link.
        let b = Braid::from([1, 1, 1]);
        let r = CompRecord::from([1]);
        let s = b.removed(1);

        let r2 = Transition::SmoothedCrossing { component: 0 }.apply(&s, &r, 1).unwrap();
        assert_eq!(r2, CompRecord::from([1, 2]));
        assert!(r2.validate(&s, 1).is_ok());

        let r2 = Transition::SmoothedCrossing { component: 0 }.apply(&s, &r, 2).unwrap();
        assert_eq!(r2, CompRecord::from([2, 1]));
        assert!(r2.validate(&s, 2).is_ok());
    }

    #[test]
    fn smoothed_split_later() {
        let b = Braid::from([1, 1, 1]).with_strands(3).unwrap();
        let r = CompRecord::from([3, 1]);
        let s = b.removed(0);
        let r2 = Transition::SmoothedCrossing { component: 1 }.apply(&s, &r, 3).unwrap();
        assert_eq!(r2, CompRecord::from([3, 1, 2]));

        let r2 = Transition::SmoothedCrossing { component: 1 }.apply(&s, &r, 2);
        assert!(r2.is_err());
    }

    #[test]
    fn reset() {
        let b = Braid::from([1, 2, 2, -1]);
        let r = CompRecord::create(&b);
        assert_eq!(r, CompRecord::from([1, 2, 3]));

        // at level 1, the first two components have swapped positions.
        let r1 = Transition::ResetToCrossing { crossing: 1 }.apply(&b, &r, 1).unwrap();
        assert_eq!(r1, CompRecord::from([2, 1, 3]));
        assert!(r1.validate(&b.rotated(1), 2).is_ok());

        let r0 = Transition::ResetToCrossing { crossing: 0 }.apply(&b, &r, 1).unwrap();
        assert_eq!(r0, r);

        assert!(Transition::ResetToCrossing { crossing: 4 }.apply(&b, &r, 1).is_err());

        let r = CompRecord::from([1, 5]);
        assert!(Transition::ResetToCrossing { crossing: 1 }.apply(&b, &r, 1).is_err());
    }

    #[test]
    fn untwist() {
        // σ₁σ₁σ₂ on 3 strands: strand 3 is deleted.
        let b = Braid::from([1, 1, 2]);
        let r = CompRecord::create(&b);
        assert_eq!(r, CompRecord::from([1, 2]));

        let r2 = Transition::UntwistCrossing { crossing: 2 }.apply(&b, &r, 1).unwrap();
        let d = b.destabilized(2).unwrap();
        assert_eq!(r2, CompRecord::from([1, 2]));
        assert_eq!(r2, CompRecord::create(&d));

        assert!(Transition::UntwistCrossing { crossing: 0 }.apply(&b, &r, 1).is_err());
    }

    #[test]
    fn untwist_first_strand() {
        // σ₁σ₂σ₂ on 3 strands: strand 1 is deleted, the rest shift down.
        let b = Braid::from([1, 2, 2]);
        let r = CompRecord::from([1, 3]);
        assert!(r.validate(&b, 1).is_ok());

        let r2 = Transition::UntwistCrossing { crossing: 0 }.apply(&b, &r, 1).unwrap();
        let d = b.destabilized(0).unwrap();
        assert_eq!(d, Braid::from([1, 1]));
        assert_eq!(r2, CompRecord::from([1, 2]));
        assert!(r2.validate(&d, 1).is_ok());

        assert_eq!(untwist_strand(&b, 1, 1).unwrap(), 1);
        assert_eq!(untwist_strand(&b, 1, 3).unwrap(), 2);
    }

    #[test]
    fn untwist_whole_component() {
        // a strand alone on its component has no partner to take over.
        let b = Braid::from([1]).with_strands(2).unwrap();
        assert!(untwist_strand(&Braid::id(2), 2, 2).is_err());
        assert_eq!(untwist_strand(&b, 2, 2).unwrap(), 1);
    }

    #[test]
    fn untwist_round_trip() {
        // re-inserting the deleted strand recovers every component, up to the shift.
        for (b, k) in [
            (Braid::from([1, 2, 2]), 0),
            (Braid::from([1, 1, 2]), 2),
            (Braid::from([1, -2, 1, 1, 3]), 4),
            (Braid::from([2, 1, -2, 2, 1, 3]), 5),
        ] {
            let r = CompRecord::create(&b);
            let doomed = b.destabilizing_strand(k).unwrap();
            let d = b.destabilized(k).unwrap();
            let r2 = Transition::UntwistCrossing { crossing: k }.apply(&b, &r, r[0]).unwrap();

            assert_eq!(r2.len(), r.len());
            assert!(r2.validate(&d, r2[0]).is_ok());

            for (i, &e) in r2.iter().enumerate() {
                let e = if e >= doomed { e + 1 } else { e };
                assert_eq!(r.component_index(&b, e), Some(i));
            }
        }
    }

    #[test]
    fn inverse_pair() {
        // σ₁σ₁σ₁⁻¹: strands 1 and 2 on one component, nothing changes.
        let b = Braid::from([1, 1, -1]);
        let r = CompRecord::create(&b);
        assert_eq!(r, CompRecord::from([1]));
        let r2 = Transition::InversePair { strand: 1 }.apply(&b, &r, 1).unwrap();
        assert_eq!(r2, r);

        // σ₁σ₂σ₁⁻¹: strands 1 and 2 on different components, the entries swap.
        let b = Braid::from([1, 2, -1]);
        let r = CompRecord::create(&b);
        assert_eq!(r, CompRecord::from([1, 2]));
        let r2 = Transition::InversePair { strand: 1 }.apply(&b, &r, 1).unwrap();
        assert_eq!(r2, CompRecord::from([2, 1]));

        let c = b.removed(2).removed(0);
        assert!(r2.validate(&c, 2).is_ok());
    }
}
