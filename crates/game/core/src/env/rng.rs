//! Dice for rules resolution.
//!
//! Every stochastic operation in the core takes a `&mut dyn DiceRoller` (or a
//! generic `D: DiceRoller`). Nothing reaches for an ambient generator, so a
//! seeded [`PcgDice`] replays an encounter exactly and [`ScriptedDice`] pins
//! individual rolls in tests.

/// Source of die rolls.
pub trait DiceRoller {
    /// Next raw 32-bit value from the underlying stream.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with `sides` faces (1..=sides). A zero-sided die rolls 1.
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }

    fn roll_d20(&mut self) -> u32 {
        self.roll_die(20)
    }

    /// Sum of `count` dice with `sides` faces.
    fn roll_dice(&mut self, count: u32, sides: u32) -> u32 {
        (0..count).map(|_| self.roll_die(sides)).sum()
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for &mut D {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// Seeded PCG-XSH-RR generator (64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator for one roll context, see [`compute_seed`].
    pub fn for_context(encounter_seed: u64, round: u64, entity: u32, context: u32) -> Self {
        Self::new(compute_seed(encounter_seed, round, entity, context))
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceRoller for PcgDice {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

/// Replays a fixed list of die faces, cycling when exhausted.
///
/// Each face is clamped into `1..=sides` of the die being rolled. An empty
/// script rolls 1 forever.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of faces consumed so far.
    pub fn rolls_made(&self) -> usize {
        self.cursor
    }

    fn next_face(&mut self) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}

impl DiceRoller for ScriptedDice {
    fn next_u32(&mut self) -> u32 {
        self.next_face().saturating_sub(1)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.next_face().clamp(1, sides.max(1))
    }
}

/// Mixes an encounter seed with roll coordinates into an independent seed.
///
/// Use a distinct `context` for each roll within the same action (attack,
/// damage, deadly die, ...).
pub fn compute_seed(encounter_seed: u64, round: u64, entity: u32, context: u32) -> u64 {
    let mut hash = encounter_seed;
    hash ^= round.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(entity).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
