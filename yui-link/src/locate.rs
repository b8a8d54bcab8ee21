use log::trace;

use crate::braid::{Braid, CrossingType, Generator};
use crate::error::{ensure, Error};
use crate::record::CompRecord;
use crate::trace::{Step, Trace};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BadCrossing {
    pub crossing: usize,
    pub component: usize
}

struct Visits {
    crossing: Vec<bool>,
    strand: Vec<bool>,
    temp_crossing: Vec<bool>,
    temp_strand: Vec<bool>
}

impl Visits {
    fn new(m: usize, n: usize) -> Self {
        Self {
            crossing: vec![false; m],
            strand: vec![false; n + 1],
            temp_crossing: vec![false; m],
            temp_strand: vec![false; n + 1]
        }
    }

    fn commit(&mut self) {
        for (v, t) in self.crossing.iter_mut().zip(self.temp_crossing.iter_mut()) {
            *v |= std::mem::take(t);
        }
        for (v, t) in self.strand.iter_mut().zip(self.temp_strand.iter_mut()) {
            *v |= std::mem::take(t);
        }
    }
}

// A classical crossing is bad when it is first reached along its under-strand.
// At σᵢ the strand arriving on position i passes over, at σᵢ⁻¹ it passes under.
fn is_bad(g: &Generator, arrive: usize) -> bool {
    match g.ctype() {
        CrossingType::Pos  => arrive != g.index(),
        CrossingType::Neg  => arrive == g.index(),
        CrossingType::Virt => false
    }
}

// Walks the components in record order, the first one starting from the basepoint,
// and returns the first crossing reached along its under-strand.
//
// The first component is entered at its record entry. Everything passed before
// reaching the basepoint is only noted temporarily, then the whole component is
// walked again from the basepoint and the temporary state is committed.
pub fn locate_bad_crossing(braid: &Braid, record: &CompRecord, basepoint: usize) -> Result<Option<BadCrossing>, Error> {
    let n = braid.strands();
    let elements = braid.elements();

    ensure!(
        (1..=n).contains(&basepoint),
        InvariantViolation,
        "basepoint {basepoint} is out of range for {n} strands."
    );

    let mut visits = Visits::new(elements.len(), n);

    for (c, &e) in record.iter().enumerate() {
        ensure!(
            (1..=n).contains(&e),
            InvariantViolation,
            "record entry {e} is out of range for {n} strands."
        );
        ensure!(
            !visits.strand[e],
            InvariantViolation,
            "record entry {e} lies on an already processed component."
        );

        let mut advanced = 0;
        let start = if c == 0 {
            let mut found = false;

            for step in Trace::new(braid, e, 0) {
                match step {
                    Step::Strand(p) if p == basepoint => {
                        found = true;
                        break
                    },
                    Step::Strand(p) => {
                        visits.temp_strand[p] = true;
                        advanced += 1;
                    },
                    Step::Crossing { index, .. } => {
                        visits.temp_crossing[index] = true;
                    }
                }
            }

            ensure!(
                found,
                InvariantViolation,
                "basepoint {basepoint} is not on the component of {e} in {braid}."
            );

            if advanced > 0 {
                trace!("basepoint {basepoint} reached after {advanced} strands from {e}, retraversing.");
            }

            basepoint
        } else {
            e
        };

        let mut count = 0;

        for step in Trace::new(braid, start, 0) {
            match step {
                Step::Strand(p) => {
                    visits.strand[p] = true;
                    count += 1;
                },
                Step::Crossing { index, arrive, .. } => {
                    if visits.crossing[index] {
                        continue
                    }
                    visits.crossing[index] = true;

                    if is_bad(&elements[index], arrive) {
                        trace!("bad crossing {index} ({}) on component {c}, arriving on {arrive}.", elements[index]);
                        return Ok(Some(BadCrossing { crossing: index, component: c }))
                    }
                }
            }
        }

        ensure!(
            count > advanced,
            InvariantViolation,
            "retraversal from {basepoint} covered {count} strands, fewer than the {advanced} already advanced."
        );

        visits.commit();
    }

    let rest = (1..=n).find(|&p| !visits.strand[p]);
    if let Some(p) = rest {
        return Err(Error::InvariantViolation(
            format!("strand {p} is on no component of record {record}.")
        ))
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    fn locate(b: &Braid, r: &[usize], bp: usize) -> Option<(usize, usize)> {
        let r = CompRecord::from(r.to_vec());
        locate_bad_crossing(b, &r, bp).unwrap().map(|c| (c.crossing, c.component))
    }

    #[test]
    fn unknot() {
        assert_eq!(locate(&Braid::id(1), &[1], 1), None);
        assert_eq!(locate(&Braid::id(3), &[1, 2, 3], 1), None);
        assert_eq!(locate(&Braid::from([1]), &[1], 1), None);
    }

    #[test]
    fn trefoil() {
        let b = Braid::from([1, 1, 1]);
        assert_eq!(locate(&b, &[1], 1), Some((1, 0)));
        assert_eq!(locate(&b, &[1], 2), Some((0, 0)));

        let b = Braid::from([-1, -1, -1]);
        assert_eq!(locate(&b, &[1], 1), Some((0, 0)));
    }

    #[test]
    fn basepoint_matters() {
        let b = Braid::from([-1]);
        assert_eq!(locate(&b, &[1], 1), Some((0, 0)));
        assert_eq!(locate(&b, &[1], 2), None);
    }

    #[test]
    fn hopf() {
        let b = Braid::from([1, 1]);
        assert_eq!(locate(&b, &[1, 2], 1), Some((1, 0)));
        assert_eq!(locate(&b, &[2, 1], 2), Some((0, 0)));

        let b = Braid::from([1, -1]);
        assert_eq!(locate(&b, &[1, 2], 1), None);
    }

    #[test]
    fn later_component() {
        let b = Braid::from([2, 2]).with_strands(3).unwrap();
        assert_eq!(locate(&b, &[1, 2, 3], 1), Some((1, 1)));
    }

    #[test]
    fn virtual_crossings() {
        let b = Braid::from_str("t1 t1").unwrap();
        assert_eq!(locate(&b, &[1, 2], 1), None);

        let b = Braid::from_str("t1 s1 t1").unwrap();
        assert_eq!(locate(&b, &[1], 1), Some((1, 0)));
        assert_eq!(locate(&b, &[1], 2), None);
    }

    #[test]
    fn corrupt_record() {
        let b = Braid::from([1, 1]);
        let r = CompRecord::from([1, 2]);
        assert!(locate_bad_crossing(&b, &r, 2).is_err());
        assert!(locate_bad_crossing(&b, &r, 3).is_err());

        let r = CompRecord::from([1]);
        assert!(locate_bad_crossing(&Braid::from([1, -1]), &r, 1).is_err());

        let r = CompRecord::from([1, 2]);
        assert!(locate_bad_crossing(&Braid::from([1]), &r, 1).is_err());
    }
}
