//! Birth/survival rule sets and the packed-value transition tables.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::grid::PACKED_MAX;

/// Per-neighbor-count flags: index k answers "does the rule fire with
/// exactly k live neighbors?".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ruleset([bool; 9]);

impl Ruleset {
    pub const fn empty() -> Self {
        Self([false; 9])
    }

    /// Build a rule set firing on exactly the given neighbor counts.
    pub fn from_counts(counts: &[u8]) -> Self {
        let mut set = Self::empty();
        for &count in counts {
            set.set(count, true);
        }
        set
    }

    #[inline(always)]
    pub fn allows(self, neighbors: u8) -> bool {
        self.0[neighbors as usize]
    }

    pub fn set(&mut self, neighbors: u8, allowed: bool) {
        self.0[neighbors as usize] = allowed;
    }
}

/// Error from parsing a `B3/S23`-style rule string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("rule string must look like B3/S23, got {0:?}")]
    Malformed(String),
    #[error("neighbor count digit out of range 0..=8: {0:?}")]
    DigitOutOfRange(char),
}

/// A full life-like rule: which counts give birth, which sustain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub birth: Ruleset,
    pub survival: Ruleset,
}

impl Rules {
    pub fn new(birth: Ruleset, survival: Ruleset) -> Self {
        Self { birth, survival }
    }

    /// Conway's Game of Life, B3/S23.
    pub fn conway() -> Self {
        Self::new(Ruleset::from_counts(&[3]), Ruleset::from_counts(&[2, 3]))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for Rules {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_string());
        let rest = s.strip_prefix('B').ok_or_else(malformed)?;
        let (birth_digits, survival_part) = rest.split_once('/').ok_or_else(malformed)?;
        let survival_digits = survival_part.strip_prefix('S').ok_or_else(malformed)?;
        Ok(Self::new(
            parse_counts(birth_digits, s)?,
            parse_counts(survival_digits, s)?,
        ))
    }
}

fn parse_counts(digits: &str, whole: &str) -> Result<Ruleset, RuleParseError> {
    let mut set = Ruleset::empty();
    for c in digits.chars() {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| RuleParseError::Malformed(whole.to_string()))?;
        if digit > 8 {
            return Err(RuleParseError::DigitOutOfRange(c));
        }
        set.set(digit as u8, true);
    }
    Ok(set)
}

impl fmt::Display for Rules {
    /// Canonical `Bxxx/Syyy` notation, digits ascending.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in 0..=8 {
            if self.birth.allows(n) {
                write!(f, "{n}")?;
            }
        }
        f.write_str("/S")?;
        for n in 0..=8 {
            if self.survival.allows(n) {
                write!(f, "{n}")?;
            }
        }
        Ok(())
    }
}

/// Transition tables keyed by the packed cell value.
///
/// One lookup answers both "is the cell alive?" and "does the rule fire?",
/// which keeps the kernel branchless on the common no-transition path.
pub struct RuleTable {
    born: [bool; (PACKED_MAX + 1) as usize],
    dies: [bool; (PACKED_MAX + 1) as usize],
}

impl RuleTable {
    pub fn new(rules: &Rules) -> Self {
        let mut table = Self {
            born: [false; (PACKED_MAX + 1) as usize],
            dies: [false; (PACKED_MAX + 1) as usize],
        };
        table.rebuild(rules);
        table
    }

    /// Recompute both tables from the rule sets. Called once per restart.
    pub fn rebuild(&mut self, rules: &Rules) {
        for v in 0..=PACKED_MAX {
            let alive = v & 1 == 1;
            let neighbors = (v >> 1) as u8;
            self.born[v as usize] = !alive && rules.birth.allows(neighbors);
            self.dies[v as usize] = alive && !rules.survival.allows(neighbors);
        }
    }

    #[inline(always)]
    pub fn becomes_alive(&self, v: i8) -> bool {
        debug_assert!((0..=PACKED_MAX).contains(&v));
        self.born[v as usize]
    }

    #[inline(always)]
    pub fn becomes_dead(&self, v: i8) -> bool {
        debug_assert!((0..=PACKED_MAX).contains(&v));
        self.dies[v as usize]
    }
}
