use crate::{pick_from_pool, BuildError, SearchConfig};
use deckforge_core::{
    count_champions, required_counts, Card, Deck, GenConfig, Role, RolePools, DECK_SIZE,
};
use rand::RngCore;

struct Placement<'p, 'a, R: ?Sized> {
    pools: &'p RolePools<'a>,
    config: &'p GenConfig,
    search: &'p SearchConfig,
    rng: &'p mut R,
    deck: Deck<'a>,
}

impl<'p, 'a, R: RngCore + ?Sized> Placement<'p, 'a, R> {
    /// Adds one eligible card of `role` to the deck, or `forced` if it is still eligible.
    fn take(&mut self, role: Role, forced: Option<&'a Card>) -> Option<&'a Card> {
        let pools = self.pools;
        let cap_reached =
            count_champions(self.deck.cards()) >= usize::from(self.config.champion_cap);
        let source: &[&'a Card] = match forced.as_ref() {
            Some(card) => std::slice::from_ref(card),
            None => pools.get(role),
        };
        let eligible: Vec<&'a Card> = source
            .iter()
            .copied()
            .filter(|card| !self.deck.contains(&card.name))
            .filter(|card| !card.champion || !cap_reached)
            .collect();
        let prefer_evo = self.config.prefer_evo && role == Role::Support;
        let picked =
            pick_from_pool(&eligible, &mut *self.rng, prefer_evo, self.search.evo_bias)?;
        self.deck.push(picked);
        Some(picked)
    }

    fn place_locks(&mut self) -> Result<(), BuildError> {
        let (pools, config) = (self.pools, self.config);
        for (role, lock) in config.role_locks.iter() {
            let Some(name) = lock.card() else {
                continue;
            };
            let unsatisfiable = || BuildError::UnsatisfiableLock {
                role,
                card: name.to_string(),
            };
            let card = pools
                .find(role, name)
                .filter(|card| !self.deck.contains(&card.name))
                .ok_or_else(unsatisfiable)?;
            self.take(role, Some(card)).ok_or_else(unsatisfiable)?;
        }
        Ok(())
    }

    /// A wildcard lock reserves one slot for a role nothing has filled yet.
    fn reserves_any(&self, role: Role) -> bool {
        if !self.config.role_locks.get(role).is_any() {
            return false;
        }
        if role == Role::Building
            && !self.config.include_def_building
            && !self.config.allow_extra_wincon_building
        {
            return false;
        }
        self.deck.count_role(role) == 0
    }

    fn fill(&mut self, role: Role, needed: usize) -> Result<(), BuildError> {
        for _ in 0..needed {
            self.take(role, None).ok_or(BuildError::PoolExhausted(role))?;
        }
        Ok(())
    }
}

/// Places locked cards, then fills win condition, small spell, big spell and
/// building quotas in that order, then support troops up to a full deck.
pub fn create_initial_deck<'a, R: RngCore + ?Sized>(
    pools: &RolePools<'a>,
    config: &GenConfig,
    search: &SearchConfig,
    rng: &mut R,
) -> Result<Deck<'a>, BuildError> {
    let mut placement = Placement {
        pools,
        config,
        search,
        rng,
        deck: Deck::new(),
    };
    placement.place_locks()?;

    let counts = required_counts(config, placement.deck.cards());
    let quotas = [
        (Role::Wincon, counts.wincon),
        (Role::SpellSmall, counts.small),
        (Role::SpellBig, counts.big),
        (Role::Building, counts.building),
    ];
    for (role, deficit) in quotas {
        let needed = if placement.reserves_any(role) {
            deficit.max(1)
        } else {
            deficit
        };
        placement.fill(role, needed)?;
    }

    while placement.deck.len() < DECK_SIZE {
        placement.fill(Role::Support, 1)?;
    }
    Ok(placement.deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::{build_pools, index_below, CardKind, Catalog, RoleLock, Tag, XorShift32};

    fn catalog() -> Catalog {
        let mut cards = vec![
            Card::new("Hog Rider", 4, Role::Wincon, CardKind::Troop),
            Card::new("Mortar", 4, Role::Wincon, CardKind::Building),
            Card::new("Zap", 2, Role::SpellSmall, CardKind::Spell),
            Card::new("Fireball", 4, Role::SpellBig, CardKind::Spell),
            Card::new("Cannon", 3, Role::Building, CardKind::Building),
            Card::new("Monk", 5, Role::Support, CardKind::Troop).as_champion(),
            Card::new("Skeleton King", 4, Role::Support, CardKind::Troop).as_champion(),
        ];
        for idx in 0..6 {
            cards.push(Card::new(
                format!("Support {idx}"),
                3,
                Role::Support,
                CardKind::Troop,
            ));
        }
        Catalog::new(cards).expect("catalog")
    }

    #[test]
    fn fills_every_quota() {
        let catalog = catalog();
        let config = GenConfig::default();
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::from_seed_str("quota");
        let deck = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng)
            .expect("deck");
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(!deck.has_duplicates());
        assert_eq!(deck.count_role(Role::Wincon), 1);
        assert_eq!(deck.count_role(Role::SpellSmall), 1);
        assert_eq!(deck.count_role(Role::SpellBig), 1);
        assert!(count_champions(deck.cards()) <= 1);
    }

    #[test]
    fn thin_pool_reports_exhausted_role() {
        let catalog = catalog();
        let config = GenConfig {
            small_spell_count: 2,
            ..GenConfig::default()
        };
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(5);
        let result = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng);
        assert_eq!(result, Err(BuildError::PoolExhausted(Role::SpellSmall)));
    }

    #[test]
    fn blacklisted_lock_is_unsatisfiable() {
        let catalog = catalog();
        let mut config = GenConfig {
            blacklist: vec!["Hog Rider".to_string()],
            ..GenConfig::default()
        };
        config
            .role_locks
            .set(Role::Wincon, RoleLock::Card("Hog Rider".to_string()));
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(5);
        let result = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng);
        assert_eq!(
            result,
            Err(BuildError::UnsatisfiableLock {
                role: Role::Wincon,
                card: "Hog Rider".to_string()
            })
        );
    }

    #[test]
    fn lock_in_wrong_role_is_unsatisfiable() {
        let catalog = catalog();
        let mut config = GenConfig::default();
        config
            .role_locks
            .set(Role::Support, RoleLock::Card("Zap".to_string()));
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(5);
        assert!(matches!(
            create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng),
            Err(BuildError::UnsatisfiableLock { role: Role::Support, .. })
        ));
    }

    #[test]
    fn locked_champion_over_cap_is_unsatisfiable() {
        let catalog = catalog();
        let mut config = GenConfig {
            champion_cap: 0,
            ..GenConfig::default()
        };
        config
            .role_locks
            .set(Role::Support, RoleLock::Card("Monk".to_string()));
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(5);
        assert!(matches!(
            create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng),
            Err(BuildError::UnsatisfiableLock { .. })
        ));
    }

    #[test]
    fn wildcard_reserves_a_spell_slot() {
        let catalog = catalog();
        let mut config = GenConfig {
            small_spell_count: 0,
            ..GenConfig::default()
        };
        config.role_locks.set(Role::SpellSmall, RoleLock::Any);
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(11);
        let deck = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng)
            .expect("deck");
        assert!(deck.contains("Zap"));
    }

    #[test]
    fn building_wildcard_needs_a_building_rule() {
        let catalog = catalog();
        let mut config = GenConfig {
            include_def_building: false,
            ..GenConfig::default()
        };
        config.role_locks.set(Role::Building, RoleLock::Any);
        config
            .role_locks
            .set(Role::Wincon, RoleLock::Card("Hog Rider".to_string()));
        let pools = build_pools(&catalog, &config);
        let mut rng = XorShift32::new(3);
        let deck = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng)
            .expect("deck");
        assert!(!deck.contains("Cannon"));

        config.allow_extra_wincon_building = true;
        let mut rng = XorShift32::new(3);
        let deck = create_initial_deck(&pools, &config, &SearchConfig::default(), &mut rng)
            .expect("deck");
        assert!(deck.contains("Cannon"));
    }

    #[test]
    fn evo_preference_skips_building_picks() {
        let mut cards: Vec<Card> = catalog().cards().to_vec();
        cards.push(
            Card::new("Tesla", 4, Role::Building, CardKind::Building).with_tags(&[Tag::Evo]),
        );
        let catalog = Catalog::new(cards).expect("catalog");
        let config = GenConfig {
            prefer_evo: true,
            ..GenConfig::default()
        };
        let pools = build_pools(&catalog, &config);
        let search = SearchConfig::default();
        let mut rng = XorShift32::from_seed_str("evo-building");
        let mut mirror = rng.clone();

        let mut placement = Placement {
            pools: &pools,
            config: &config,
            search: &search,
            rng: &mut rng,
            deck: Deck::new(),
        };
        let picked = placement.take(Role::Building, None).expect("building");
        let buildings = pools.get(Role::Building);
        let expected = index_below(&mut mirror, buildings.len());
        assert_eq!(picked.name, buildings[expected].name);
        assert_eq!(rng, mirror);
    }
}
