//! `serde` support: collections serialize as plain sequences.

use std::marker::PhantomData;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
};

use crate::{
    BoolSortedSet, ImmutableList, ImmutableSortedSet,
    kind::{Element, SortedElement},
};

impl<T: Element + Serialize> Serialize for ImmutableList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: SortedElement + Serialize> Serialize for ImmutableSortedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Serialize for BoolSortedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct ElementsVisitor<T>(PhantomData<T>);

impl<'de, T: Element + Deserialize<'de>> Visitor<'de> for ElementsVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a sequence of {} values", T::KIND)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<T>, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(values)
    }
}

impl<'de, T: Element + Deserialize<'de>> Deserialize<'de> for ImmutableList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = deserializer.deserialize_seq(ElementsVisitor(PhantomData))?;
        Ok(ImmutableList::from_vec(values))
    }
}

/// Deserializes under the natural ordering, sorting and dropping duplicates.
impl<'de, T: SortedElement + Deserialize<'de>> Deserialize<'de> for ImmutableSortedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values: Vec<T> = deserializer.deserialize_seq(ElementsVisitor(PhantomData))?;
        Ok(ImmutableSortedSet::copy_of(values))
    }
}

/// Deserializes under the natural ordering. Use [`BoolSortedSet::to_shared`]
/// to get back the process-wide instance for the decoded shape.
impl<'de> Deserialize<'de> for BoolSortedSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values: Vec<bool> = deserializer.deserialize_seq(ElementsVisitor(PhantomData))?;
        Ok(BoolSortedSet::clone(&BoolSortedSet::copy_of(values)))
    }
}
