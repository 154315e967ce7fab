use deckforge_core::{
    building_slot_available, hard_fail_reason, required_counts, Card, CardKind, GenConfig,
    HardFail, Preset, Role,
};

macro_rules! role_id_case {
    ($name:ident, $id:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(Role::from_id($id), $expected);
        }
    };
}

role_id_case!(role_wincon, "wincon", Some(Role::Wincon));
role_id_case!(role_win_condition, "win-condition", Some(Role::Wincon));
role_id_case!(role_support, "support", Some(Role::Support));
role_id_case!(role_spell_small, "spell-small", Some(Role::SpellSmall));
role_id_case!(role_small, "Small", Some(Role::SpellSmall));
role_id_case!(role_spell_big, "spell-big", Some(Role::SpellBig));
role_id_case!(role_big_spell, "big-spell", Some(Role::SpellBig));
role_id_case!(role_building, " building ", Some(Role::Building));
role_id_case!(role_unknown, "tower", None);

macro_rules! preset_id_case {
    ($name:ident, $id:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(Preset::from_id($id), $expected);
        }
    };
}

preset_id_case!(preset_ladder, "ladder", Some(Preset::Ladder));
preset_id_case!(preset_classic, "Classic", Some(Preset::Classic));
preset_id_case!(preset_2v2, "2v2", Some(Preset::TwoVTwo));
preset_id_case!(preset_draft, "draft", Some(Preset::DraftAssist));
preset_id_case!(preset_unknown, "tournament", None);

fn mortar() -> Card {
    Card::new("Mortar", 4, Role::Wincon, CardKind::Building)
}

fn hog() -> Card {
    Card::new("Hog Rider", 4, Role::Wincon, CardKind::Troop)
}

macro_rules! building_slot_case {
    ($name:ident, $include:expr, $extra:expr, $wincon:expr, $deficit:expr, $available:expr) => {
        #[test]
        fn $name() {
            let config = GenConfig {
                include_def_building: $include,
                allow_extra_wincon_building: $extra,
                ..GenConfig::default()
            };
            let wincon = $wincon;
            let placed = [&wincon];
            assert_eq!(required_counts(&config, &placed).building, $deficit);
            assert_eq!(building_slot_available(&config, &placed), $available);
        }
    };
}

building_slot_case!(slot_troop_default, true, false, hog(), 1, true);
building_slot_case!(slot_building_default, true, false, mortar(), 0, false);
building_slot_case!(slot_building_extra, true, true, mortar(), 1, true);
building_slot_case!(slot_troop_extra, true, true, hog(), 1, true);
building_slot_case!(slot_off_troop, false, false, hog(), 0, false);
building_slot_case!(slot_off_building, false, false, mortar(), 0, false);
building_slot_case!(slot_off_building_extra, false, true, mortar(), 0, false);

fn full_deck(first: Card, last: Card) -> Vec<Card> {
    let mut cards = vec![
        first,
        Card::new("Zap", 2, Role::SpellSmall, CardKind::Spell),
        Card::new("Fireball", 4, Role::SpellBig, CardKind::Spell),
    ];
    for idx in 0..4 {
        cards.push(Card::new(
            format!("Support {idx}"),
            3,
            Role::Support,
            CardKind::Troop,
        ));
    }
    cards.push(last);
    cards
}

macro_rules! gate_case {
    ($name:ident, $first:expr, $last:expr, $config:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let cards = full_deck($first, $last);
            let refs: Vec<&Card> = cards.iter().collect();
            assert_eq!(hard_fail_reason(&refs, &$config), $expected);
        }
    };
}

gate_case!(
    gate_valid,
    hog(),
    Card::new("Tesla", 4, Role::Building, CardKind::Building),
    GenConfig::default(),
    None
);
gate_case!(
    gate_building_conflict,
    mortar(),
    Card::new("Tesla", 4, Role::Building, CardKind::Building),
    GenConfig::default(),
    Some(HardFail::BuildingSlot)
);
gate_case!(
    gate_building_conflict_without_slot,
    mortar(),
    Card::new("Tesla", 4, Role::Building, CardKind::Building),
    GenConfig {
        include_def_building: false,
        ..GenConfig::default()
    },
    None
);
gate_case!(
    gate_two_wincons_when_one_wanted,
    hog(),
    mortar(),
    GenConfig::default(),
    Some(HardFail::Wincons(2))
);
gate_case!(
    gate_missing_big_spell,
    hog(),
    Card::new("Rocket", 6, Role::SpellBig, CardKind::Spell),
    GenConfig::default(),
    Some(HardFail::BigSpells(2))
);
gate_case!(
    gate_champion_cap,
    hog(),
    Card::new("Monk", 5, Role::Support, CardKind::Troop).as_champion(),
    GenConfig {
        champion_cap: 0,
        ..GenConfig::default()
    },
    Some(HardFail::ChampionCap {
        champions: 1,
        cap: 0
    })
);
