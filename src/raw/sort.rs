use core::cmp::Ordering;

/// Stable top-down merge sort.
///
/// Only ever asks `compare` whether the right element is strictly less than
/// the left one, so a comparator that is not a total order (mixed-type
/// values, NaN) yields some permutation instead of a panic.
pub(crate) fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equal_elements_keep_their_order() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = merge_sort_by(items, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(sorted, [(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn inconsistent_comparators_do_not_panic() {
        // Rock-paper-scissors: every element beats the next.
        let items: Vec<u8> = (0..64).map(|i| i % 3).collect();
        let sorted = merge_sort_by(items.clone(), &mut |a: &u8, b: &u8| {
            if (a + 1) % 3 == *b { Ordering::Less } else { Ordering::Greater }
        });
        let mut expected = items;
        expected.sort_unstable();
        let mut actual = sorted;
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    proptest! {
        #[test]
        fn matches_std_stable_sort(items in proptest::collection::vec((0u8..8, any::<u16>()), 0..300)) {
            let mut expected = items.clone();
            expected.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted = merge_sort_by(items, &mut |a: &(u8, u16), b: &(u8, u16)| a.0.cmp(&b.0));
            prop_assert_eq!(sorted, expected);
        }
    }
}
