use crate::config::RemainderPolicy;

/// Split `interior` cells among children along the stacking axis.
///
/// Children with a percent claim `floor(interior * p / 100)`; when the set
/// percents add up to more than 100 each one is scaled by `100 / total`.
/// Children without a percent share what is left, rounded to the nearest
/// cell, and the last of them absorbs the rounding error.
pub(crate) fn distribute(
    interior: usize,
    percents: &[Option<u8>],
    policy: RemainderPolicy,
) -> Vec<usize> {
    if percents.is_empty() {
        return Vec::new();
    }

    let interior = interior as u64;
    let claimed: u64 = percents.iter().flatten().map(|p| u64::from(*p)).sum();
    let scale = claimed.max(100);
    let free: Vec<usize> = percents
        .iter()
        .enumerate()
        .filter_map(|(idx, percent)| percent.is_none().then_some(idx))
        .collect();

    let free_share = if free.is_empty() || claimed >= 100 {
        0
    } else {
        let num = interior * (100 - claimed);
        let den = 100 * free.len() as u64;
        (2 * num + den) / (2 * den)
    };

    let mut lengths: Vec<i64> = percents
        .iter()
        .map(|percent| match percent {
            Some(p) => (interior * u64::from(*p) / scale) as i64,
            None => free_share as i64,
        })
        .collect();

    let delta = interior as i64 - lengths.iter().sum::<i64>();
    if free.is_empty() {
        if policy == RemainderPolicy::LastChild {
            if let Some(last) = lengths.last_mut() {
                *last += delta;
            }
        }
    } else {
        absorb(&mut lengths, &free, delta);
    }

    lengths.into_iter().map(|len| len.max(0) as usize).collect()
}

/// Push `delta` onto the free children, last first, never below zero.
fn absorb(lengths: &mut [i64], free: &[usize], mut delta: i64) {
    for &idx in free.iter().rev() {
        if delta == 0 {
            break;
        }
        let adjusted = lengths[idx] + delta;
        if adjusted >= 0 {
            lengths[idx] = adjusted;
            delta = 0;
        } else {
            lengths[idx] = 0;
            delta = adjusted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(interior: usize, percents: &[Option<u8>]) -> Vec<usize> {
        distribute(interior, percents, RemainderPolicy::LastChild)
    }

    #[test]
    fn equal_split_gives_remainder_to_last() {
        assert_eq!(split(8, &[None, None]), vec![4, 4]);
        assert_eq!(split(9, &[None, None]), vec![5, 4]);
        assert_eq!(split(10, &[None, None, None]), vec![3, 3, 4]);
    }

    #[test]
    fn percent_child_claims_its_share() {
        assert_eq!(split(20, &[Some(50), None, None]), vec![10, 5, 5]);
        assert_eq!(split(20, &[None, Some(25), None]), vec![8, 5, 7]);
    }

    #[test]
    fn oversubscribed_percents_are_normalised() {
        assert_eq!(split(30, &[Some(60), Some(60), Some(60)]), vec![10, 10, 10]);
        assert_eq!(split(40, &[Some(150), Some(50), None]), vec![30, 10, 0]);
    }

    #[test]
    fn rounding_never_goes_negative() {
        let lengths = split(3, &[None; 6]);
        assert_eq!(lengths.iter().sum::<usize>(), 3);
        assert!(lengths.iter().all(|len| *len <= 1));
    }

    #[test]
    fn all_percent_remainder_follows_policy() {
        assert_eq!(split(10, &[Some(30), Some(30)]), vec![3, 7]);
        assert_eq!(
            distribute(10, &[Some(30), Some(30)], RemainderPolicy::Leave),
            vec![3, 3]
        );
    }

    #[test]
    fn conservation_over_mixed_inputs() {
        let cases: &[&[Option<u8>]] = &[
            &[None],
            &[Some(0), None],
            &[Some(33), Some(33), None],
            &[Some(70), Some(70), None, None],
            &[Some(100), None],
            &[Some(1), Some(2), Some(3)],
        ];
        for interior in 0..50 {
            for percents in cases {
                let total: usize = split(interior, percents).iter().sum();
                assert_eq!(total, interior, "{percents:?} over {interior}");
            }
        }
    }

    #[test]
    fn distribution_is_deterministic() {
        let percents = [Some(40), None, Some(15), None];
        assert_eq!(split(37, &percents), split(37, &percents));
    }
}
