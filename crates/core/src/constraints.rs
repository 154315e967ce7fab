use crate::{Card, Catalog, GenConfig, Role};
use std::collections::HashSet;

/// Per-role candidate lists filtered from the catalog for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolePools<'a> {
    pools: [Vec<&'a Card>; 5],
}

impl<'a> RolePools<'a> {
    pub fn get(&self, role: Role) -> &[&'a Card] {
        &self.pools[role.index()]
    }

    pub fn find(&self, role: Role, name: &str) -> Option<&'a Card> {
        self.get(role).iter().copied().find(|card| card.name == name)
    }

    pub fn total(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }
}

pub fn build_pools<'a>(catalog: &'a Catalog, config: &GenConfig) -> RolePools<'a> {
    let owned: HashSet<&str> = config.owned.iter().map(String::as_str).collect();
    let blacklist: HashSet<&str> = config.blacklist.iter().map(String::as_str).collect();
    let underleveled: HashSet<&str> = config.underleveled.iter().map(String::as_str).collect();

    let keep = |card: &Card| {
        let name = card.name.as_str();
        if blacklist.contains(name) {
            return false;
        }
        if !config.allow_champions && card.champion {
            return false;
        }
        if config.owned_only && !owned.is_empty() && !owned.contains(name) {
            return false;
        }
        if config.avoid_underleveled && underleveled.contains(name) {
            return false;
        }
        true
    };

    let mut pools = RolePools::default();
    for card in catalog.cards() {
        if keep(card) {
            pools.pools[card.role.index()].push(card);
        }
    }
    pools
}

pub fn count_by_role(cards: &[&Card], role: Role) -> usize {
    cards.iter().filter(|card| card.role == role).count()
}

pub fn count_champions(cards: &[&Card]) -> usize {
    cards.iter().filter(|card| card.champion).count()
}

/// Mean cost; an empty slice divides by one.
pub fn avg_elixir(cards: &[&Card]) -> f64 {
    let total: f64 = cards.iter().map(|card| f64::from(card.cost)).sum();
    total / cards.len().max(1) as f64
}

/// Cards still needed per quota role, given what is already placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleDeficits {
    pub wincon: usize,
    pub small: usize,
    pub big: usize,
    pub building: usize,
}

pub fn required_counts(config: &GenConfig, current: &[&Card]) -> RoleDeficits {
    let wincons = count_by_role(current, Role::Wincon);
    let building_wincon = current.iter().any(|card| card.is_building_wincon());
    let defensive_buildings = count_by_role(current, Role::Building);

    let mut building_slots = usize::from(config.include_def_building);
    if !config.allow_extra_wincon_building && building_wincon {
        building_slots = building_slots.saturating_sub(1);
    }

    RoleDeficits {
        wincon: usize::from(config.wincon_count).saturating_sub(wincons),
        small: usize::from(config.small_spell_count)
            .saturating_sub(count_by_role(current, Role::SpellSmall)),
        big: usize::from(config.big_spell_count)
            .saturating_sub(count_by_role(current, Role::SpellBig)),
        building: building_slots.saturating_sub(defensive_buildings),
    }
}

pub fn building_slot_available(config: &GenConfig, deck: &[&Card]) -> bool {
    if !config.include_def_building {
        return false;
    }
    if config.allow_extra_wincon_building {
        return true;
    }
    !deck.iter().any(|card| card.is_building_wincon())
}
