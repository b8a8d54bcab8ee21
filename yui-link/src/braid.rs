use std::fmt;
use std::ops::{Mul, MulAssign};
use std::str::FromStr;
use auto_impl_ops::auto_ops;
use delegate::delegate;
use derive_more::Display;
use itertools::Itertools;
use yui::Sign;
use yui::util::format::{subscript, superscript};

use crate::error::{ensure, Error};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Display)]
pub enum CrossingType {
    #[display("+")]
    Pos,
    #[display("-")]
    Neg,
    #[display("v")]
    Virt
}

impl CrossingType {
    pub fn sign(&self) -> Option<Sign> {
        match self {
            CrossingType::Pos  => Some(Sign::Pos),
            CrossingType::Neg  => Some(Sign::Neg),
            CrossingType::Virt => None
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, CrossingType::Virt)
    }

    // virtual crossings have no over/under information.
    pub fn flipped(&self) -> Self {
        match self {
            CrossingType::Pos  => CrossingType::Neg,
            CrossingType::Neg  => CrossingType::Pos,
            CrossingType::Virt => CrossingType::Virt
        }
    }
}

// σᵢ (Pos), σᵢ⁻¹ (Neg) or τᵢ (Virt), acting on the adjacent positions i, i + 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generator {
    index: usize,
    ctype: CrossingType
}

impl Generator {
    pub fn new(index: usize, ctype: CrossingType) -> Self {
        assert!(index > 0, "generator index must be positive.");
        Self { index, ctype }
    }

    pub fn pos(index: usize) -> Self {
        Self::new(index, CrossingType::Pos)
    }

    pub fn neg(index: usize) -> Self {
        Self::new(index, CrossingType::Neg)
    }

    pub fn virt(index: usize) -> Self {
        Self::new(index, CrossingType::Virt)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ctype(&self) -> CrossingType {
        self.ctype
    }

    pub fn is_virtual(&self) -> bool {
        self.ctype.is_virtual()
    }

    pub fn flipped(&self) -> Self {
        Self { index: self.index, ctype: self.ctype.flipped() }
    }

    pub fn inv(&self) -> Self {
        self.flipped()
    }

    pub fn is_inverse_of(&self, other: &Generator) -> bool {
        self.index == other.index && self.inv().ctype == other.ctype
    }

    pub fn involves(&self, pos: usize) -> bool {
        pos == self.index || pos == self.index + 1
    }

    // the position reached by a strand arriving at `pos`.
    pub fn pass(&self, pos: usize) -> usize {
        if pos == self.index {
            pos + 1
        } else if pos == self.index + 1 {
            pos - 1
        } else {
            pos
        }
    }

    fn shifted_down(&self) -> Self {
        Self::new(self.index - 1, self.ctype)
    }
}

impl TryFrom<i32> for Generator {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        ensure!(value != 0, MalformedBraid, "generator code must be non-zero.");

        let index = value.unsigned_abs() as usize;
        let ctype = if value > 0 { CrossingType::Pos } else { CrossingType::Neg };
        Ok(Self::new(index, ctype))
    }
}

// `s1`, `-s1` or `t1`.
impl FromStr for Generator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (ctype, rest) = if let Some(rest) = s.strip_prefix("-s") {
            (CrossingType::Neg, rest)
        } else if let Some(rest) = s.strip_prefix('s') {
            (CrossingType::Pos, rest)
        } else if let Some(rest) = s.strip_prefix('t') {
            (CrossingType::Virt, rest)
        } else {
            return Err(Error::MalformedBraid(format!("invalid term: '{s}'")))
        };

        let index = usize::from_str(rest).map_err(|_|
            Error::MalformedBraid(format!("invalid term: '{s}'"))
        )?;
        ensure!(index > 0, MalformedBraid, "invalid term: '{s}'");

        Ok(Self::new(index, ctype))
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = subscript(self.index);
        match self.ctype {
            CrossingType::Pos  => write!(f, "σ{i}"),
            CrossingType::Neg  => write!(f, "σ{i}{}", superscript(-1)),
            CrossingType::Virt => write!(f, "τ{i}"),
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

// A braid word on `strands` strands, read from top to bottom.
// Positions are numbered 1..=strands, terms are indexed from 0.
// Derived words (`removed`, `flipped_at`, ...) are new values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Braid {
    strands: usize,
    elements: Vec<Generator>
}

impl Braid {
    pub fn try_new(strands: usize, elements: Vec<Generator>) -> Result<Self, Error> {
        ensure!(strands > 0, MalformedBraid, "a braid needs at least one strand.");
        for (k, g) in elements.iter().enumerate() {
            ensure!(
                g.index() < strands,
                MalformedBraid,
                "term {k} ({g}) does not fit in {strands} strands."
            );
        }
        Ok(Self { strands, elements })
    }

    pub fn id(strands: usize) -> Self {
        assert!(strands > 0);
        Self { strands, elements: vec![] }
    }

    pub fn from_code(code: &[i32]) -> Result<Self, Error> {
        let elements: Vec<_> = code.iter().map(|&c| Generator::try_from(c)).try_collect()?;
        Ok(Self::from_iter(elements))
    }

    pub fn with_strands(self, strands: usize) -> Result<Self, Error> {
        Self::try_new(strands, self.elements)
    }

    pub fn strands(&self) -> usize {
        self.strands
    }

    pub fn elements(&self) -> &[Generator] {
        &self.elements
    }

    delegate! {
        to self.elements {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }

    pub fn has_virtual(&self) -> bool {
        self.elements.iter().any(|g| g.is_virtual())
    }

    pub fn is_classical(&self) -> bool {
        !self.has_virtual()
    }

    pub fn count_index(&self, index: usize) -> usize {
        self.elements.iter().filter(|g| g.index() == index).count()
    }

    // the position at level `k` (just above term `k`) of the strand
    // starting at position `pos` at the top.
    pub fn level_position(&self, pos: usize, k: usize) -> usize {
        self.elements[..k].iter().fold(pos, |p, g| g.pass(p))
    }

    // Seifert smoothing of the crossing at `k`.
    pub fn removed(&self, k: usize) -> Self {
        let mut elements = self.elements.clone();
        elements.remove(k);
        Self { strands: self.strands, elements }
    }

    pub fn flipped_at(&self, k: usize) -> Self {
        let mut elements = self.elements.clone();
        elements[k] = elements[k].flipped();
        Self { strands: self.strands, elements }
    }

    // conjugation: moves the first `k` terms to the bottom.
    pub fn rotated(&self, k: usize) -> Self {
        let mut elements = self.elements.clone();
        if !elements.is_empty() {
            elements.rotate_left(k % self.len());
        }
        Self { strands: self.strands, elements }
    }

    // The strand deleted by a Markov destabilization at term `k`, if it is one:
    // either the generator σₙ₋₁ (deletes strand n) or σ₁ (deletes strand 1)
    // occurring exactly once. The latter is only allowed for classical braids.
    pub fn destabilizing_strand(&self, k: usize) -> Option<usize> {
        let n = self.strands;
        let i = self.elements.get(k)?.index();

        if self.count_index(i) != 1 {
            None
        } else if i == n - 1 {
            Some(n)
        } else if i == 1 && self.is_classical() {
            Some(1)
        } else {
            None
        }
    }

    pub fn destabilized(&self, k: usize) -> Option<Self> {
        let doomed = self.destabilizing_strand(k)?;
        let elements = self.elements.iter().enumerate().filter(|&(j, _)| j != k).map(|(_, g)|
            if doomed == 1 { g.shifted_down() } else { *g }
        ).collect();
        Some(Self { strands: self.strands - 1, elements })
    }

    pub fn inv(&self) -> Self {
        let elements = self.elements.iter().rev().map(|g| g.inv()).collect();
        Self { strands: self.strands, elements }
    }

    pub fn mirror(&self) -> Self {
        let elements = self.elements.iter().map(|g| g.flipped()).collect();
        Self { strands: self.strands, elements }
    }

    pub fn display(&self) -> String {
        fn row(strands: usize, gen: &Generator) -> String {
            let index = gen.index();
            let mid = match gen.ctype() {
                CrossingType::Pos  => " / ",
                CrossingType::Neg  => " \\ ",
                CrossingType::Virt => " o ",
            };

            (0..3).map(|r| {
                (1..=strands).map(|i| {
                    if i == index {
                        match r {
                            0 => "\\ /",
                            1 => mid,
                            _ => "/ \\",
                        }
                    } else if i == index + 1 {
                        " "
                    } else {
                        "| "
                    }
                }).join("")
            }).join("\n")
        }

        self.elements.iter().map(|gen|
            row(self.strands, gen)
        ).join("\n")
    }
}

impl<const N: usize> From<[i32; N]> for Braid {
    // panics if the code contains 0.
    fn from(code: [i32; N]) -> Self {
        match Self::from_code(&code) {
            Ok(b) => b,
            Err(e) => panic!("{e}")
        }
    }
}

impl FromIterator<Generator> for Braid {
    fn from_iter<T: IntoIterator<Item = Generator>>(iter: T) -> Self {
        let elements = iter.into_iter().collect_vec();
        let strands = elements.iter().map(|g| g.index() + 1).max().unwrap_or(1);
        Self { strands, elements }
    }
}

// Accepts either a word `s1 s1 -s2 t3` (separators optional)
// or a JSON list of classical codes `[1, 1, -2]`.
impl FromStr for Braid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();

        if s.starts_with('[') {
            let code: Vec<i32> = serde_json::from_str(s).map_err(|e|
                Error::MalformedBraid(e.to_string())
            )?;
            return Self::from_code(&code)
        }

        let r = regex::Regex::new(r"-?[st][0-9]+").map_err(|e|
            Error::MalformedBraid(e.to_string())
        )?;

        let rest = r.replace_all(s, "");
        ensure!(
            rest.chars().all(|c| c.is_whitespace() || c == ','),
            MalformedBraid,
            "invalid braid word: '{s}'"
        );

        let elements: Vec<_> = r.find_iter(s).map(|m|
            Generator::from_str(m.as_str())
        ).try_collect()?;

        Ok(Self::from_iter(elements))
    }
}

impl fmt::Display for Braid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "1")
        }
        for gen in self.elements.iter() {
            write!(f, "{gen}")?
        }
        Ok(())
    }
}

impl fmt::Debug for Braid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} strands)", self, self.strands)
    }
}

#[auto_ops]
impl MulAssign<&Braid> for Braid {
    fn mul_assign(&mut self, rhs: &Braid) {
        assert_eq!(self.strands, rhs.strands);
        self.elements.extend(rhs.elements.iter().cloned());
    }
}
