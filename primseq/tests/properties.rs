use std::sync::Arc;

use primseq::{
    BoolSortedSet, DoubleList, Error, ImmutableList, IntList, IntSortedSet, LongList, Spliterator,
};
use proptest::prelude::*;

/// Picks `from <= to <= len` from two arbitrary seeds.
fn bounds(len: usize, a: usize, b: usize) -> (usize, usize) {
    let x = a % (len + 1);
    let y = b % (len + 1);
    (x.min(y), x.max(y))
}

fn drain_split(mut piece: Spliterator<i64>, depth: u32, out: &mut Vec<i64>) {
    if depth > 0 {
        if let Some(prefix) = piece.try_split() {
            drain_split(prefix, depth - 1, out);
            drain_split(piece, depth - 1, out);
            return;
        }
    }
    piece.for_each_remaining(|v| out.push(v));
}

proptest! {
    #[test]
    fn sub_list_reads_through_to_parent(
        values in prop::collection::vec(any::<i32>(), 0..64),
        a in any::<usize>(),
        b in any::<usize>()
    ) {
        let list = IntList::from_vec(values.clone());
        let (from, to) = bounds(values.len(), a, b);
        let view = list.sub_list(from, to).unwrap();
        prop_assert_eq!(view.len(), to - from);
        for i in 0..view.len() {
            prop_assert_eq!(view.get(i), list.get(from + i));
        }
        prop_assert!(view.get(view.len()).is_err());
    }

    #[test]
    fn sub_lists_compose(
        values in prop::collection::vec(any::<i32>(), 0..64),
        seeds in any::<(usize, usize, usize, usize)>()
    ) {
        let list = IntList::from_vec(values.clone());
        let (from, to) = bounds(values.len(), seeds.0, seeds.1);
        let (inner_from, inner_to) = bounds(to - from, seeds.2, seeds.3);
        let nested = list.sub_list(from, to).unwrap().sub_list(inner_from, inner_to).unwrap();
        let direct = list.sub_list(from + inner_from, from + inner_to).unwrap();
        prop_assert_eq!(nested.as_slice(), direct.as_slice());
        prop_assert!(ImmutableList::ptr_eq(&nested, &direct));
    }

    #[test]
    fn equality_is_element_wise(
        a in prop::collection::vec(-3i32..3, 0..6),
        b in prop::collection::vec(-3i32..3, 0..6)
    ) {
        let left = IntList::of(&a);
        let right = IntList::from_vec(b.clone());
        prop_assert_eq!(left == right, a == b);
        prop_assert_eq!(left.compare_to(&right), a.cmp(&b));
    }

    #[test]
    fn equal_lists_hash_alike(
        prefix in prop::collection::vec(any::<f64>(), 0..8),
        values in prop::collection::vec(any::<f64>(), 0..32)
    ) {
        let mut padded = prefix.clone();
        padded.extend_from_slice(&values);
        let parent = DoubleList::from_vec(padded);
        let view = parent.sub_list(prefix.len(), parent.len()).unwrap();
        let owned = DoubleList::of(&values);
        prop_assert_eq!(&view, &owned);
        prop_assert_eq!(view.hash_code(), owned.hash_code());
    }

    #[test]
    fn spliterator_covers_every_element_once(
        values in prop::collection::vec(any::<i64>(), 0..128),
        depth in 0u32..6
    ) {
        let list = LongList::from_vec(values.clone());
        let mut seen = Vec::with_capacity(values.len());
        drain_split(list.spliterator(), depth, &mut seen);
        prop_assert_eq!(seen, values);
    }

    #[test]
    fn sorted_set_is_strictly_ascending(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let set = IntSortedSet::copy_of(values.clone());
        let mut expected = values;
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.as_list().to_vec(), expected);
    }

    #[test]
    fn head_and_tail_partition_the_set(
        values in prop::collection::vec(-50i32..50, 0..64),
        pivot in -60i32..60
    ) {
        let set = IntSortedSet::copy_of(values);
        let head = set.head_set(pivot);
        let tail = set.tail_set(pivot);
        prop_assert_eq!(head.len() + tail.len(), set.len());
        prop_assert!(head.iter().all(|v| v < pivot));
        prop_assert!(tail.iter().all(|v| v >= pivot));
    }

    #[test]
    fn bool_sets_are_canonical(values in prop::collection::vec(any::<bool>(), 0..16)) {
        let set = BoolSortedSet::copy_of(values.clone());
        let expected = match (values.contains(&false), values.contains(&true)) {
            (false, false) => BoolSortedSet::empty(),
            (true, true) => BoolSortedSet::full(),
            (_, only) => BoolSortedSet::singleton(only),
        };
        prop_assert!(Arc::ptr_eq(&set, &expected));
    }

    #[test]
    fn empty_deltas_always_succeed(values in prop::collection::vec(0i32..100, 0..32)) {
        let list = IntList::from_vec(values.clone());
        prop_assert_eq!(list.add_all([]), Ok(false));
        prop_assert_eq!(list.remove_all([]), Ok(false));
        prop_assert_eq!(list.remove_all([-1, 100]), Ok(false));
        prop_assert_eq!(list.retain_all(values.clone()), Ok(false));
        let cleared = list.clear();
        if values.is_empty() {
            prop_assert_eq!(cleared, Ok(()));
        } else {
            prop_assert_eq!(cleared, Err(Error::UnsupportedMutation { operation: "clear" }));
        }
    }
}
