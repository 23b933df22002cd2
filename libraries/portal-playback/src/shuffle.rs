//! Shuffle draw for "next" resolution
//!
//! Shuffle does not reorder the playlist. Each "next" is an independent
//! uniform draw, excluding the current track whenever there is anything else
//! to pick.

use rand::Rng;

/// Pick a uniformly random index in `0..len`, avoiding `exclude` when possible
pub fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize, exclude: Option<usize>) -> Option<usize> {
    match (len, exclude) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, Some(skip)) if skip < len => {
            // Draw from len - 1 slots and step over the excluded one
            let pick = rng.gen_range(0..len - 1);
            Some(if pick >= skip { pick + 1 } else { pick })
        }
        _ => Some(rng.gen_range(0..len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_has_no_pick() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_index(&mut rng, 0, None), None);
    }

    #[test]
    fn single_entry_may_repeat() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_index(&mut rng, 1, Some(0)), Some(0));
    }

    #[test]
    fn never_picks_excluded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let pick = random_index(&mut rng, 5, Some(2)).unwrap();
            assert_ne!(pick, 2);
            assert!(pick < 5);
        }
    }

    #[test]
    fn reaches_every_other_index() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[random_index(&mut rng, 4, Some(0)).unwrap()] = true;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn out_of_range_exclude_is_ignored() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(random_index(&mut rng, 3, Some(10)).unwrap() < 3);
        }
    }
}
