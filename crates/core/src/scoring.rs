use crate::{
    all_present, avg_elixir, count_by_role, count_champions, count_named, count_tag, coverage,
    has_tag, Card, GenConfig, Role, SynergyTables, Tag, DECK_SIZE,
};
use serde::{Deserialize, Serialize};

/// Score returned for a structurally invalid deck.
pub const HARD_FAIL: f64 = -1e9;
/// Anything at or below this is treated as a hard fail.
pub const HARD_FAIL_THRESHOLD: f64 = -1e8;

const ELIXIR_SCALE: f64 = 10.0;
const COVERAGE_PENALTY: f64 = 6.0;
const SYNERGY_SCALE: f64 = 5.0;
const WINCON_PAIR_BONUS: f64 = 10.0;
const ANTI_SYNERGY_PENALTY: f64 = 12.0;
const DOUBLE_BUILDING_PENALTY: f64 = 15.0;
const AIR_BIAS_SCALE: f64 = 2.0;
const STYLE_BIAS_SCALE: f64 = 1.5;
const EVO_BONUS: f64 = 2.0;
const PRESENCE_BONUS: f64 = 3.0;

pub fn is_hard_fail(score: f64) -> bool {
    score <= HARD_FAIL_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardFail {
    DeckSize(usize),
    ChampionCap { champions: usize, cap: u8 },
    SmallSpells(usize),
    BigSpells(usize),
    Wincons(usize),
    /// A building win condition and a defensive building share the one building slot.
    BuildingSlot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub elixir: f64,
    pub coverage: f64,
    pub synergy: f64,
    pub wincon_pairs: f64,
    pub anti_synergy: f64,
    pub double_building: f64,
    pub bias: f64,
    pub evo: f64,
    pub presence: f64,
    pub card_weights: f64,
    pub total: f64,
}

macro_rules! add_term {
    ($score:ident . $field:ident, $value:expr) => {{
        let value = $value;
        $score.$field += value;
        $score.total += value;
    }};
}

pub fn hard_fail_reason(cards: &[&Card], config: &GenConfig) -> Option<HardFail> {
    if cards.len() != DECK_SIZE {
        return Some(HardFail::DeckSize(cards.len()));
    }
    let champions = count_champions(cards);
    if champions > usize::from(config.champion_cap) {
        return Some(HardFail::ChampionCap {
            champions,
            cap: config.champion_cap,
        });
    }
    let small = count_by_role(cards, Role::SpellSmall);
    if small != usize::from(config.small_spell_count) {
        return Some(HardFail::SmallSpells(small));
    }
    let big = count_by_role(cards, Role::SpellBig);
    if big != usize::from(config.big_spell_count) {
        return Some(HardFail::BigSpells(big));
    }
    let wincons = count_by_role(cards, Role::Wincon);
    if wincons != usize::from(config.wincon_count) {
        return Some(HardFail::Wincons(wincons));
    }
    let building_wincon = cards.iter().any(|card| card.is_building_wincon());
    let defensive_building = cards.iter().any(|card| card.role == Role::Building);
    if !config.allow_extra_wincon_building
        && config.include_def_building
        && building_wincon
        && defensive_building
    {
        return Some(HardFail::BuildingSlot);
    }
    None
}

/// Itemised score of a structurally valid deck. Terms are accumulated into
/// `total` in a fixed order so the result is reproducible bit for bit.
pub fn score_breakdown(
    cards: &[&Card],
    config: &GenConfig,
    tables: &SynergyTables,
) -> Result<ScoreBreakdown, HardFail> {
    if let Some(reason) = hard_fail_reason(cards, config) {
        return Err(reason);
    }
    let weights = &config.weights;
    let sliders = &config.bias_sliders;
    let mut score = ScoreBreakdown::default();

    let avg = avg_elixir(cards);
    let drift = (avg - config.target_avg).abs() * ELIXIR_SCALE * weights.avg_weight;
    add_term!(score.elixir, -drift);

    let coverage_penalty = COVERAGE_PENALTY * weights.coverage_weight;
    for (_, present) in coverage(cards).flags() {
        if !present {
            add_term!(score.coverage, -coverage_penalty);
        }
    }

    for anchor in cards {
        for rule in tables.rules_for(&anchor.name) {
            let matches = count_named(cards, &rule.with) as f64;
            let bonus = matches * SYNERGY_SCALE * rule.weight * weights.synergy_weight;
            add_term!(score.synergy, bonus);
        }
    }

    for pair in &tables.wincon_pairs {
        if all_present(cards, pair) {
            add_term!(score.wincon_pairs, WINCON_PAIR_BONUS * weights.synergy_weight);
        }
    }

    for pair in &tables.negative {
        if all_present(cards, pair) {
            add_term!(score.anti_synergy, -(ANTI_SYNERGY_PENALTY * weights.synergy_weight));
        }
    }

    let building_wincons = cards
        .iter()
        .filter(|card| card.is_building_wincon())
        .count();
    if config.wincon_count == 2 && building_wincons == 2 && !config.allow_extra_wincon_building {
        add_term!(score.double_building, -DOUBLE_BUILDING_PENALTY);
    }

    let biases = [
        (Tag::Air, AIR_BIAS_SCALE, weights.bias_air + sliders.air),
        (Tag::Cycle, STYLE_BIAS_SCALE, weights.bias_cycle + sliders.cycle),
        (Tag::Control, STYLE_BIAS_SCALE, weights.bias_control + sliders.control),
        (Tag::Beatdown, STYLE_BIAS_SCALE, weights.bias_beatdown + sliders.beatdown),
    ];
    for (tag, scale, bias) in biases {
        let count = count_tag(cards, tag) as f64;
        add_term!(score.bias, count * scale * bias);
    }

    if config.prefer_evo {
        let evo = count_tag(cards, Tag::Evo) as f64;
        add_term!(score.evo, evo * EVO_BONUS);
    }

    // stacks with the coverage penalty above
    for tag in [Tag::SwarmAnswer, Tag::Splash, Tag::Reset, Tag::Air] {
        if has_tag(cards, tag) {
            add_term!(score.presence, PRESENCE_BONUS);
        }
    }

    let card_weights: f64 = cards.iter().fold(0.0, |acc, card| acc + card.weight);
    add_term!(score.card_weights, card_weights);

    Ok(score)
}

pub fn score_deck(cards: &[&Card], config: &GenConfig, tables: &SynergyTables) -> f64 {
    match score_breakdown(cards, config, tables) {
        Ok(breakdown) => breakdown.total,
        Err(_) => HARD_FAIL,
    }
}
