//! Preset and randomly generated inputs.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::Sequences;

/// Built-in sample inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// `[[1,4,5],[1,3,4],[2,6]]`
    Example,
    /// `[]`
    Empty,
    /// `[[]]`
    EmptyList,
    /// `[[1,2,4],[1,3,5]]`
    TwoLists,
    /// `[[1,2,3,4,5]]`
    Single,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 5] = [
        Self::Example,
        Self::Empty,
        Self::EmptyList,
        Self::TwoLists,
        Self::Single,
    ];

    /// Returns the name accepted by [`Preset::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Example => "example",
            Self::Empty => "empty",
            Self::EmptyList => "empty-list",
            Self::TwoLists => "two-lists",
            Self::Single => "single",
        }
    }

    /// Returns the sequences of this preset.
    pub fn sequences(self) -> Sequences {
        match self {
            Self::Example => vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]],
            Self::Empty => Vec::new(),
            Self::EmptyList => vec![Vec::new()],
            Self::TwoLists => vec![vec![1, 2, 4], vec![1, 3, 5]],
            Self::Single => vec![vec![1, 2, 3, 4, 5]],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset `{s}`, expected one of: {}", names.join(", "))
            })
    }
}

/// Generate a small random input: 2 to 5 sequences of 1 to 5 values each,
/// starting between -5 and 4 and growing by 1 to 5 per step.
///
/// # Example
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let sequences = mergeviz_input::random_sequences(&mut rng);
/// assert!(mergeviz_input::validate(&sequences).is_ok());
/// ```
pub fn random_sequences<R: Rng + ?Sized>(rng: &mut R) -> Sequences {
    let count = rng.random_range(2..=5);
    (0..count)
        .map(|_| {
            let len = rng.random_range(1..=5);
            let mut value: i64 = rng.random_range(-5..=4);
            let mut sequence = Vec::with_capacity(len);
            for _ in 0..len {
                sequence.push(value);
                value += rng.random_range(1..=5);
            }
            sequence
        })
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::validate;

    /// Random samples must always pass validation and respect the size bounds.
    fn check_random_sample_shape(seed: u64) -> Result<(), TestCaseError> {
        let sequences = random_sequences(&mut StdRng::seed_from_u64(seed));

        prop_assert!((2..=5).contains(&sequences.len()));
        for sequence in &sequences {
            prop_assert!((1..=5).contains(&sequence.len()));
            prop_assert!((-5..=4).contains(&sequence[0]));
        }
        prop_assert!(validate(&sequences).is_ok());
        Ok(())
    }

    proptest! {
        #[test]
        fn random_sample_shape(seed in any::<u64>()) {
            check_random_sample_shape(seed)?;
        }
    }
}
