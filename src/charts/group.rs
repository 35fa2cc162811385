//! Ordering and partitioning of tagged entities.
//!
//! The same routines run over leaf [`Item`]s and over the [`Row`]s and
//! [`Chart`]s built from them; all they need is [`Tagged`].
//!
//! [`Row`]: super::Row
//! [`Chart`]: super::Chart

use std::cmp::Ordering;

use super::Item;
use crate::metadata::Metadata;

/// Anything carrying metadata that can be flattened to leaf items.
pub trait Tagged {
    fn metadata(&self) -> &Metadata;

    /// Leaf items in display order.
    fn leaves(&self) -> Vec<&Item>;
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn metadata(&self) -> &Metadata {
        (**self).metadata()
    }

    fn leaves(&self) -> Vec<&Item> {
        (**self).leaves()
    }
}

/// A run of entities sharing the same projection onto the grouping keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    /// The shared projection. Empty when grouping on no keys.
    pub metadata: Metadata,
    pub members: Vec<T>,
}

/// Projects `meta` onto `keys`; absent keys map to `""`.
pub fn submeta<S: AsRef<str>>(meta: &Metadata, keys: &[S]) -> Metadata {
    meta.submeta(keys)
}

/// Stable-sorts `entities` ascending by their values for `keys`.
///
/// Keys before the last decide only when they differ; the last key decides
/// otherwise. With no keys the input order is returned unchanged.
pub fn order_by<T: Tagged, S: AsRef<str>>(mut entities: Vec<T>, keys: &[S]) -> Vec<T> {
    if keys.is_empty() {
        return entities;
    }
    entities.sort_by(|a, b| compare_on(a.metadata(), b.metadata(), keys));
    entities
}

fn compare_on<S: AsRef<str>>(a: &Metadata, b: &Metadata, keys: &[S]) -> Ordering {
    let Some((last, rest)) = keys.split_last() else {
        return Ordering::Equal;
    };
    for key in rest {
        let key = key.as_ref();
        match a.value(key).cmp(b.value(key)) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    let last = last.as_ref();
    a.value(last).cmp(b.value(last))
}

/// Partitions `entities` into maximal runs with equal projections on `keys`.
///
/// Entities are ordered by [`order_by`] first, so each distinct projection
/// yields exactly one group and groups come out in key order. With no keys
/// every entity becomes its own group with empty metadata, in input order.
pub fn group<T: Tagged, S: AsRef<str>>(entities: Vec<T>, keys: &[S]) -> Vec<Group<T>> {
    if entities.is_empty() {
        return Vec::new();
    }
    if keys.is_empty() {
        return entities
            .into_iter()
            .map(|entity| Group {
                metadata: Metadata::new(),
                members: vec![entity],
            })
            .collect();
    }

    let mut groups = Vec::new();
    let mut current: Option<Group<T>> = None;
    for entity in order_by(entities, keys) {
        let sub = entity.metadata().submeta(keys);
        match current.as_mut() {
            Some(run) if run.metadata == sub => run.members.push(entity),
            _ => {
                if let Some(done) = current.take() {
                    groups.push(done);
                }
                current = Some(Group {
                    metadata: sub,
                    members: vec![entity],
                });
            }
        }
    }
    groups.extend(current);

    tracing::trace!(groups = groups.len(), "grouped entities");
    groups
}
