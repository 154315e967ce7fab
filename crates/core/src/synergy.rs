use crate::{Card, Catalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partners that score for an anchor card, `weight` per partner present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositiveRule {
    pub with: Vec<String>,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyTables {
    #[serde(default)]
    pub positive: BTreeMap<String, Vec<PositiveRule>>,
    #[serde(default)]
    pub negative: Vec<Vec<String>>,
    #[serde(default)]
    pub wincon_pairs: Vec<Vec<String>>,
}

impl SynergyTables {
    pub fn rules_for(&self, anchor: &str) -> &[PositiveRule] {
        self.positive
            .get(anchor)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drops partner names the catalog does not know. Returns how many were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let mut dropped = 0;
        for rules in self.positive.values_mut() {
            for rule in rules.iter_mut() {
                let before = rule.with.len();
                rule.with.retain(|name| catalog.contains(name));
                dropped += before - rule.with.len();
            }
        }
        dropped
    }

    /// Every name referenced by any table, for load-time diagnostics.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (anchor, rules) in &self.positive {
            names.push(anchor);
            for rule in rules {
                names.extend(rule.with.iter().map(String::as_str));
            }
        }
        for group in self.negative.iter().chain(self.wincon_pairs.iter()) {
            names.extend(group.iter().map(String::as_str));
        }
        names.sort_unstable();
        names.dedup();
        names
    }
}

pub fn count_named(cards: &[&Card], names: &[String]) -> usize {
    cards
        .iter()
        .filter(|card| names.iter().any(|name| *name == card.name))
        .count()
}

pub fn all_present(cards: &[&Card], names: &[String]) -> bool {
    names
        .iter()
        .all(|name| cards.iter().any(|card| card.name == *name))
}
