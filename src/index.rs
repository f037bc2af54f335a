//! Lookup indexes derived from the catalog
//!
//! Five read-only structures:
//! - first -> color
//! - first -> seconds
//! - (first, second) -> color
//! - (first, second) -> thirds
//! - (first, second, third) -> color
//!
//! Colors keep the first value seen in table order; later rows with a
//! different color for the same key are ignored. Sequences keep insertion
//! order without duplicates. Lookups never fail: missing colors resolve to
//! the default gray and missing sequences to an empty slice.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::catalog::Catalog;
use crate::color::HexColor;

type Pair = (String, String);
type Trio = (String, String, String);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indexes {
    first_color: HashMap<String, HexColor>,
    first_to_seconds: HashMap<String, Vec<String>>,
    pair_color: HashMap<Pair, HexColor>,
    pair_to_thirds: HashMap<Pair, Vec<String>>,
    triple_color: HashMap<Trio, HexColor>,
    fallback: HexColor,
}

/// Append `value` to the sequence under `key` unless already present
fn push_unique<K: Hash + Eq + Clone>(
    map: &mut HashMap<K, Vec<String>>,
    seen: &mut HashSet<(K, String)>,
    key: K,
    value: &str,
) {
    if seen.insert((key.clone(), value.to_string())) {
        map.entry(key).or_default().push(value.to_string());
    }
}

/// Record `color` under `key` unless the key already has one
fn keep_first<K: Hash + Eq>(map: &mut HashMap<K, HexColor>, key: K, color: &HexColor) {
    if let Entry::Vacant(slot) = map.entry(key) {
        slot.insert(color.clone());
    }
}

impl Indexes {
    /// Derive all lookup structures from the catalog
    pub fn build(catalog: &Catalog) -> Self {
        let mut idx = Self::default();
        let mut seen_seconds = HashSet::new();
        let mut seen_thirds = HashSet::new();

        for row in catalog.rows() {
            let pair = (row.first.clone(), row.second.clone());

            keep_first(&mut idx.first_color, row.first.clone(), &row.color_first);
            push_unique(
                &mut idx.first_to_seconds,
                &mut seen_seconds,
                row.first.clone(),
                &row.second,
            );
            keep_first(&mut idx.pair_color, pair.clone(), &row.color_second);
            push_unique(
                &mut idx.pair_to_thirds,
                &mut seen_thirds,
                pair,
                &row.third,
            );
            keep_first(
                &mut idx.triple_color,
                (row.first.clone(), row.second.clone(), row.third.clone()),
                &row.color_third,
            );
        }

        tracing::info!(
            firsts = idx.first_color.len(),
            pairs = idx.pair_color.len(),
            triples = idx.triple_color.len(),
            "Indexes built"
        );
        idx
    }

    /// Color of a first item
    pub fn first_color(&self, first: &str) -> &HexColor {
        self.first_color.get(first).unwrap_or(&self.fallback)
    }

    /// Color of a second item under its first
    pub fn pair_color(&self, first: &str, second: &str) -> &HexColor {
        self.pair_color
            .get(&pair_key(first, second))
            .unwrap_or(&self.fallback)
    }

    /// Color of a third item under its pair
    pub fn triple_color(&self, first: &str, second: &str, third: &str) -> &HexColor {
        self.triple_color
            .get(&(first.to_string(), second.to_string(), third.to_string()))
            .unwrap_or(&self.fallback)
    }

    /// Seconds of a first item, in table order
    pub fn seconds(&self, first: &str) -> &[String] {
        self.first_to_seconds
            .get(first)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Thirds of a pair, in table order
    pub fn thirds(&self, first: &str, second: &str) -> &[String] {
        self.pair_to_thirds
            .get(&pair_key(first, second))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All first items, sorted
    pub fn firsts(&self) -> Vec<String> {
        sorted(self.first_color.keys())
    }

    /// Seconds of a first item, sorted
    pub fn seconds_sorted(&self, first: &str) -> Vec<String> {
        sorted(self.seconds(first))
    }

    /// Thirds of a pair, sorted
    pub fn thirds_sorted(&self, first: &str, second: &str) -> Vec<String> {
        sorted(self.thirds(first, second))
    }
}

fn pair_key(first: &str, second: &str) -> Pair {
    (first.to_string(), second.to_string())
}

fn sorted<'a>(items: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = items.into_iter().cloned().collect();
    out.sort();
    out
}
