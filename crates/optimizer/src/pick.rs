use deckforge_core::{index_below, unit_f64, Card, Tag};
use rand::RngCore;

/// Uniform pick from `pool`. With `prefer_evo`, evolution-tagged cards are
/// drawn from on their own with probability `evo_bias`.
pub fn pick_from_pool<'a, R: RngCore + ?Sized>(
    pool: &[&'a Card],
    rng: &mut R,
    prefer_evo: bool,
    evo_bias: f64,
) -> Option<&'a Card> {
    if pool.is_empty() {
        return None;
    }
    if !prefer_evo {
        return Some(pool[index_below(rng, pool.len())]);
    }
    let evo: Vec<&'a Card> = pool
        .iter()
        .copied()
        .filter(|card| card.has_tag(Tag::Evo))
        .collect();
    if !evo.is_empty() && unit_f64(rng) < evo_bias {
        return Some(evo[index_below(rng, evo.len())]);
    }
    Some(pool[index_below(rng, pool.len())])
}
