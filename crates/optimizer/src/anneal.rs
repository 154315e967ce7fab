use crate::{pick_from_pool, SearchConfig};
use deckforge_core::{
    index_below, score_deck, unit_f64, Card, Deck, GenConfig, Role, RolePools, SynergyTables,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnealStats {
    pub initial_score: f64,
    pub best_score: f64,
    pub accepted: u32,
    pub improved: u32,
    pub skipped: u32,
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome<'a> {
    pub deck: Deck<'a>,
    pub stats: AnnealStats,
}

/// Single-card swap search under a linear cooling schedule. Runs the full
/// step budget and returns the best deck seen, not the last one. Slots holding
/// a card named by a role lock are never swapped out.
pub fn anneal<'a, R: RngCore + ?Sized>(
    deck: &Deck<'a>,
    pools: &RolePools<'a>,
    config: &GenConfig,
    tables: &SynergyTables,
    search: &SearchConfig,
    rng: &mut R,
) -> AnnealOutcome<'a> {
    let initial_score = score_deck(deck.cards(), config, tables);
    let mut best = deck.clone();
    let mut best_score = initial_score;
    let mut current = deck.clone();
    let mut current_score = initial_score;
    let mut stats = AnnealStats {
        initial_score,
        ..AnnealStats::default()
    };

    let pinned: Vec<&str> = config
        .role_locks
        .iter()
        .filter_map(|(_, lock)| lock.card())
        .collect();
    let steps = search.anneal_steps;
    if current.is_empty() {
        stats.best_score = best_score;
        return AnnealOutcome { deck: best, stats };
    }

    for step in 0..steps {
        let temperature = 1.0 - f64::from(step) / f64::from(steps);
        let index = index_below(rng, current.len());
        let slot = current.cards()[index];
        if pinned.contains(&slot.name.as_str()) {
            stats.skipped += 1;
            continue;
        }
        let role = slot.role;
        let candidates: Vec<&'a Card> = pools
            .get(role)
            .iter()
            .copied()
            .filter(|card| !current.contains(&card.name))
            .collect();
        let prefer_evo = config.prefer_evo && role == Role::Support;
        let Some(replacement) = pick_from_pool(&candidates, rng, prefer_evo, search.evo_bias)
        else {
            stats.skipped += 1;
            continue;
        };

        let next = current.with_replacement(index, replacement);
        let next_score = score_deck(next.cards(), config, tables);
        let delta = next_score - current_score;
        let accept = delta > 0.0
            || (delta / temperature.max(search.min_temperature)).exp() > unit_f64(rng);
        if !accept {
            continue;
        }
        stats.accepted += 1;
        current = next;
        current_score = next_score;
        if current_score > best_score {
            stats.improved += 1;
            best = current.clone();
            best_score = current_score;
        }
    }

    stats.best_score = best_score;
    AnnealOutcome { deck: best, stats }
}
