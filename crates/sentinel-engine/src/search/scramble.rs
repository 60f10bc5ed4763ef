//! Move-order scrambling with a small multiplicative generator.

/// Pseudo-random generator used to shuffle candidate moves.
///
/// Each step computes `state = state * 15 ^ 1` in wrapping 32-bit arithmetic. The
/// generator is owned by the searcher, so two searchers never share a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scrambler {
    state: u32,
}

impl Scrambler {
    /// Steps taken when seeding.
    pub const SEED_ROUNDS: usize = 10;

    /// Seed a generator, running [`SEED_ROUNDS`](Self::SEED_ROUNDS) steps.
    pub fn new(seed: u32) -> Scrambler {
        let mut scrambler = Scrambler { state: seed };
        for _ in 0..Self::SEED_ROUNDS {
            scrambler.step();
        }
        scrambler
    }

    /// Generator resuming exactly at `state`, without seeding.
    pub const fn from_state(state: u32) -> Scrambler {
        Scrambler { state }
    }

    /// Current internal state.
    pub const fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(15) ^ 1;
        self.state
    }

    /// Shuffle `items` in place: each position in turn swaps with a drawn index.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let n = items.len();
        for i in 0..n {
            let j = (self.step() >> 1) as usize % n;
            items.swap(i, j);
        }
    }

    /// Derive an independent generator, advancing this one by a step.
    pub fn fork(&mut self) -> Scrambler {
        Scrambler::new(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sequence() {
        let mut s = Scrambler::default();
        assert_eq!(s.step(), 1);
        assert_eq!(s.step(), 14);
        assert_eq!(s.step(), 211);
    }

    #[test]
    fn seeding_runs_ten_steps() {
        let mut manual = Scrambler::from_state(12345);
        for _ in 0..10 {
            manual.step();
        }
        assert_eq!(Scrambler::new(12345), manual);
    }

    #[test]
    fn shuffle_from_zero_state() {
        let mut items = [0, 1, 2];
        Scrambler::default().shuffle(&mut items);
        assert_eq!(items, [2, 1, 0]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut s = Scrambler::new(99);
        let mut items: Vec<u32> = (0..40).collect();
        s.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        Scrambler::new(7).shuffle(&mut a);
        Scrambler::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_slice_is_fine() {
        let mut s = Scrambler::new(1);
        let before = s;
        s.shuffle::<u8>(&mut []);
        assert_eq!(s, before);
    }
}
