//! Merge combinators, one per kind of configuration field.
//!
//! Every combinator takes the accumulator (`this`) and the less specific scope (`defaults`),
//! and only ever adds to `this`. They are meant to be referenced from
//! `#[merge(with = "...")]` attributes, or called from hand-written [`Merge`] impls.

use std::{collections::BTreeMap, hash::Hash};

use itertools::Itertools;
use k8s_openapi::api::core::v1::{Container, EnvVar, ResourceClaim, Volume, VolumeMount};

use super::merge::Merge;

/// An item of a list that is identified by a unique key (usually its `name`) rather than by its
/// position.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for EnvVar {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for Volume {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for VolumeMount {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for Container {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for ResourceClaim {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Takes `defaults` if `this` is not set yet, without looking into either value.
///
/// Used for scalars and for objects that are only ever inherited as a whole.
pub fn coalesce<T: Clone>(this: &mut Option<T>, defaults: &Option<T>) {
    if this.is_none() {
        this.clone_from(defaults);
    }
}

/// Like [`coalesce`], but recurses into the value with `policy` if both sides are set.
pub fn optional_with<T: Clone>(
    this: &mut Option<T>,
    defaults: &Option<T>,
    policy: impl FnOnce(&mut T, &T),
) {
    match (this, defaults) {
        (Some(this), Some(defaults)) => policy(this, defaults),
        (this @ None, Some(_)) => this.clone_from(defaults),
        (_, None) => {}
    }
}

/// Merges a nested object field by field.
///
/// A missing object is merged into an empty one rather than copied, so the field policies of `T`
/// (such as the deduplication of [`set_union`]) apply to inherited objects as well.
pub fn nested<T: Merge + Default>(this: &mut Option<T>, defaults: &Option<T>) {
    if let Some(defaults) = defaults {
        this.get_or_insert_with(T::default).merge(defaults);
    }
}

/// Appends every item of `defaults` whose key is not used by `this` yet.
///
/// Items that are already present are never replaced or reordered, inherited items keep the
/// order they had in `defaults`.
pub fn keyed_union<T: Keyed + Clone>(this: &mut Vec<T>, defaults: &[T]) {
    let inherited = defaults
        .iter()
        .filter(|default| !this.iter().any(|item| item.key() == default.key()))
        .cloned()
        .collect::<Vec<_>>();
    this.extend(inherited);
}

/// Appends every item of `defaults`, duplicates included.
pub fn append<T: Clone>(this: &mut Vec<T>, defaults: &[T]) {
    this.extend_from_slice(defaults);
}

/// Inserts every entry of `defaults` whose key is not present in `this` yet.
pub fn map_union<K: Ord + Clone, V: Clone>(this: &mut BTreeMap<K, V>, defaults: &BTreeMap<K, V>) {
    for (key, value) in defaults {
        this.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

/// Treats both lists as sets and stores their union in `this`.
///
/// Values keep the position of their first occurrence, but callers must not rely on the order.
pub fn set_union<T: Eq + Hash + Clone>(this: &mut Vec<T>, defaults: &[T]) {
    let union = this.iter().chain(defaults).unique().cloned().collect();
    *this = union;
}

/// [`set_union`] for lists that may be absent. The result is absent only if both sides are.
pub fn optional_set_union<T: Eq + Hash + Clone>(
    this: &mut Option<Vec<T>>,
    defaults: &Option<Vec<T>>,
) {
    if this.is_none() && defaults.is_none() {
        return;
    }
    set_union(
        this.get_or_insert_with(Vec::new),
        defaults.as_deref().unwrap_or_default(),
    );
}

/// Sorts keyed items by their key, which is the canonical order for lists whose declaration order
/// carries no meaning.
pub fn sort_by_key<T: Keyed>(items: &mut [T]) {
    items.sort_by(|a, b| a.key().cmp(b.key()));
}
