//! Answer choice sets
//!
//! Each tile offers three distinct values: the correct answer plus two
//! distractors near it. Distractors are always inside
//! [`CHOICE_MIN`, `CHOICE_MAX`].

use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::{CHOICE_COUNT, CHOICE_MAX, CHOICE_MIN, CHOICE_SPREAD};

/// The values shown on the answer buttons, in slot order
pub type Choices = [i32; CHOICE_COUNT];

/// Random draws attempted before switching to the deterministic fill.
/// With 20 non-zero offsets, 64 draws practically never run out.
pub const MAX_CHOICE_DRAWS: u32 = 64;

fn in_range(value: i32) -> bool {
    (CHOICE_MIN..=CHOICE_MAX).contains(&value)
}

/// Build a shuffled choice set containing `correct`.
///
/// Distractors are `correct + delta` for random `delta` in
/// `-CHOICE_SPREAD..=CHOICE_SPREAD`. If the random phase cannot finish (only
/// possible when `correct` is far outside the range, e.g. `12 × 12`), the
/// nearest in-range values fill the remaining slots.
pub fn build<R: Rng + ?Sized>(correct: i32, rng: &mut R) -> Choices {
    let mut choices = [correct; CHOICE_COUNT];
    let mut len = 1;

    let mut draws = 0;
    while len < CHOICE_COUNT && draws < MAX_CHOICE_DRAWS {
        draws += 1;
        let candidate = correct + rng.random_range(-CHOICE_SPREAD..=CHOICE_SPREAD);
        if in_range(candidate) && !choices[..len].contains(&candidate) {
            choices[len] = candidate;
            len += 1;
        }
    }

    if len < CHOICE_COUNT {
        log::debug!("Choice draws exhausted for {}, filling nearest", correct);
        let anchor = correct.clamp(CHOICE_MIN, CHOICE_MAX);
        let mut step = 0;
        while len < CHOICE_COUNT {
            for candidate in [anchor - step, anchor + step] {
                if len < CHOICE_COUNT && in_range(candidate) && !choices[..len].contains(&candidate)
                {
                    choices[len] = candidate;
                    len += 1;
                }
            }
            step += 1;
        }
    }

    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn distinct(choices: &Choices) -> bool {
        choices[0] != choices[1] && choices[1] != choices[2] && choices[0] != choices[2]
    }

    #[test]
    fn test_boundary_answers() {
        let mut rng = Pcg32::seed_from_u64(1);
        for correct in [CHOICE_MIN, CHOICE_MIN + 1, CHOICE_MAX - 1, CHOICE_MAX] {
            let choices = build(correct, &mut rng);
            assert!(choices.contains(&correct));
            assert!(distinct(&choices));
            assert!(choices.iter().all(|c| in_range(*c)));
        }
    }

    #[test]
    fn test_out_of_range_answer_terminates() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut choices = build(144, &mut rng);
        assert!(choices.contains(&144));
        assert!(distinct(&choices));
        choices.sort();
        assert_eq!(choices, [99, 100, 144]);
    }

    #[test]
    fn test_partially_in_range_answer() {
        let mut rng = Pcg32::seed_from_u64(3);
        let choices = build(108, &mut rng);
        assert!(choices.contains(&108));
        assert!(distinct(&choices));
        for c in choices.iter().filter(|c| **c != 108) {
            assert!((98..=100).contains(c));
        }
    }

    proptest! {
        #[test]
        fn three_distinct_in_range(correct in CHOICE_MIN..=CHOICE_MAX, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let choices = build(correct, &mut rng);
            prop_assert!(choices.contains(&correct));
            prop_assert!(distinct(&choices));
            for c in choices {
                prop_assert!(in_range(c));
                prop_assert!((c - correct).abs() <= CHOICE_SPREAD);
            }
        }
    }
}
