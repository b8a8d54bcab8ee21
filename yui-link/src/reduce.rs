use log::trace;

use crate::braid::Braid;
use crate::error::Error;
use crate::record::{untwist_strand, CompRecord, Transition};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reduced {
    pub braid: Braid,
    pub record: CompRecord,
    pub basepoint: usize
}

impl Reduced {
    pub fn new(braid: Braid, record: CompRecord, basepoint: usize) -> Self {
        Self { braid, record, basepoint }
    }
}

// Deletes redundant terms until none is left, keeping the record and the
// basepoint on the same components:
//
//  1. adjacent inverse terms `σσ⁻¹`, `ττ`,
//  2. an inverse pair split over the ends of the word (conjugation),
//  3. a Markov destabilisation at the last generator, or at the first one
//     when the word has no virtual terms.
//
// Only terms are ever deleted, so the result is never longer than the input.
pub fn reduce(braid: &Braid, record: &CompRecord, basepoint: usize) -> Result<Reduced, Error> {
    let mut state = Reduced::new(braid.clone(), record.clone(), basepoint);
    while step(&mut state)? {}
    Ok(state)
}

fn step(state: &mut Reduced) -> Result<bool, Error> {
    let b = &state.braid;
    let m = b.len();
    let elements = b.elements();

    if let Some(k) = (0..m.saturating_sub(1)).find(|&k| elements[k].is_inverse_of(&elements[k + 1])) {
        trace!("cancel {}{} at {k} in {b}.", elements[k], elements[k + 1]);

        state.braid = b.removed(k + 1).removed(k);
        return Ok(true)
    }

    if m > 2 && elements[m - 1].is_inverse_of(&elements[0]) {
        let g = elements[0];
        trace!("cancel {}..{} at the ends of {b}.", elements[0], elements[m - 1]);

        let record = Transition::InversePair { strand: g.index() }.apply(b, &state.record, state.basepoint)?;
        state.basepoint = g.pass(state.basepoint);
        state.record = record;
        state.braid = b.removed(m - 1).removed(0);
        return Ok(true)
    }

    let found = (0..m).rev().find_map(|k|
        b.destabilizing_strand(k).map(|doomed| (k, doomed))
    );

    if let Some((k, doomed)) = found {
        trace!("destabilise {} at {k} in {b}, deleting strand {doomed}.", elements[k]);

        let record = Transition::UntwistCrossing { crossing: k }.apply(b, &state.record, state.basepoint)?;
        let basepoint = untwist_strand(b, doomed, state.basepoint)?;

        if let Some(braid) = b.destabilized(k) {
            state.braid = braid;
            state.record = record;
            state.basepoint = basepoint;
            return Ok(true)
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    fn reduced(b: &Braid) -> Reduced {
        let r = CompRecord::create(b);
        reduce(b, &r, r[0]).unwrap()
    }

    #[test]
    fn cancel_interior() {
        let b = Braid::from([1, 2, 2, -2, 1]);
        let r = CompRecord::create(&b);
        let res = reduce(&b, &r, 1).unwrap();

        assert_eq!(res.braid, Braid::from([1, 1]));
        assert_eq!(res.record, CompRecord::create(&res.braid));
    }

    #[test]
    fn cancel_to_unknot() {
        let res = reduced(&Braid::from([1, -1, 1]));
        assert_eq!(res.braid, Braid::id(1));
        assert_eq!(res.record, CompRecord::from([1]));
        assert_eq!(res.basepoint, 1);
    }

    #[test]
    fn cancel_ends() {
        // σ₁ σ₂σ₂ σ₁⁻¹ on 3 strands is conjugate to σ₂σ₂.
        let b = Braid::from([1, 2, 2, -1]);
        let r = CompRecord::create(&b);
        assert_eq!(r, CompRecord::from([1, 2, 3]));

        let res = reduce(&b, &r, 1).unwrap();
        assert_eq!(res.braid, Braid::from([2, 2]).with_strands(3).unwrap());
        assert_eq!(res.record, CompRecord::from([2, 1, 3]));
        assert_eq!(res.basepoint, 2);
        assert!(res.record.validate(&res.braid, res.basepoint).is_ok());
    }

    #[test]
    fn destabilise() {
        let res = reduced(&Braid::from([1, 1, 1, 2]));
        assert_eq!(res.braid, Braid::from([1, 1, 1]));
        assert_eq!(res.record, CompRecord::from([1]));

        let res = reduced(&Braid::from([1, 2, 2, 2]));
        assert_eq!(res.braid, Braid::from([1, 1, 1]));
        assert_eq!(res.record, CompRecord::from([1]));
    }

    #[test]
    fn untouched() {
        for b in [Braid::from([1, 1, 1]), Braid::from([1, -2, 1, -2]), Braid::from([1, 1])] {
            let res = reduced(&b);
            assert_eq!(res.braid, b);
            assert_eq!(res.record, CompRecord::create(&b));
        }
    }

    #[test]
    fn virtual_terms() {
        // τ₁ is never removed from the left end.
        let b = Braid::from_str("t1 s2 s2").unwrap();
        let res = reduced(&b);
        assert_eq!(res.braid, b);

        let b = Braid::from_str("s1 s1 t2").unwrap();
        let res = reduced(&b);
        assert_eq!(res.braid, Braid::from([1, 1]));

        let b = Braid::from_str("t1 t1 s1").unwrap();
        let res = reduced(&b);
        assert_eq!(res.braid, Braid::id(1));
    }

    #[test]
    fn idempotent() {
        for b in [
            Braid::from([1, 2, -1, 2, 3, -2]),
            Braid::from([1, 2, 2, -1]),
            Braid::from([2, -1, 2, 1, 3, 3, -2]),
        ] {
            let res = reduced(&b);
            assert!(res.braid.len() <= b.len());
            assert!(res.record.validate(&res.braid, res.basepoint).is_ok());

            let res2 = reduce(&res.braid, &res.record, res.basepoint).unwrap();
            assert_eq!(res2, res);
        }
    }
}
