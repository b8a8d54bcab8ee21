use crate::braid::Braid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Step {
    // the walk is at the base level, on the given position.
    Strand(usize),
    Crossing { index: usize, arrive: usize, depart: usize }
}

// Walks a component of the closure of `braid`, starting at position `start`
// at level `base` (just above term `base`) and going down through the terms,
// wrapping cyclically. Ends when the walk comes back to `start` at the base level.
//
// Each pass through the whole word emits one `Step::Strand`, so a component
// occupying `k` positions at the base level is walked in `k` passes.
pub struct Trace<'a> {
    braid: &'a Braid,
    base: usize,
    start: usize,
    pos: usize,
    offset: usize,
    started: bool,
    done: bool
}

impl<'a> Trace<'a> {
    pub fn new(braid: &'a Braid, start: usize, base: usize) -> Self {
        assert!(
            (1..=braid.strands()).contains(&start),
            "position {start} is out of range for {} strands.", braid.strands()
        );

        let base = if braid.is_empty() { 0 } else { base % braid.len() };
        Self { braid, base, start, pos: start, offset: 0, started: false, done: false }
    }

    // positions occupied by the component at the base level, in the order visited.
    pub fn strands(self) -> Vec<usize> {
        self.filter_map(|s| match s {
            Step::Strand(p) => Some(p),
            _ => None
        }).collect()
    }
}

impl<'a> Iterator for Trace<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }

        if !self.started {
            self.started = true;
            return Some(Step::Strand(self.start))
        }

        let elements = self.braid.elements();
        let m = elements.len();

        loop {
            if self.offset == m {
                self.offset = 0;
                if self.pos == self.start {
                    self.done = true;
                    return None
                } else {
                    return Some(Step::Strand(self.pos))
                }
            }

            let index = (self.base + self.offset) % m;
            self.offset += 1;

            let g = &elements[index];
            if g.involves(self.pos) {
                let arrive = self.pos;
                self.pos = g.pass(arrive);
                return Some(Step::Crossing { index, arrive, depart: self.pos })
            }
        }
    }
}
