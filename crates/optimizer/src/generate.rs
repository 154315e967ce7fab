use crate::{
    anneal, create_initial_deck, AttemptOutcome, AttemptRecord, BuildError, GenerateError,
    GenerationReport, SearchConfig, SummaryStats,
};
use deckforge_core::{
    build_pools, coverage, is_hard_fail, score_breakdown, seed_from_str, Catalog, Deck,
    GenConfig, SynergyTables, XorShift32,
};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Generated<'a> {
    pub deck: Deck<'a>,
    pub report: GenerationReport,
}

/// Seed of the generator used by `attempt`. Every attempt gets its own stream,
/// still fully determined by the configured seed string.
pub fn attempt_seed(seed: &str, attempt: u32) -> u32 {
    seed_from_str(&format!("{seed}:{attempt}")) ^ seed_from_str(seed)
}

pub fn generate_deck<'a>(
    catalog: &'a Catalog,
    tables: &SynergyTables,
    config: &GenConfig,
) -> Result<Deck<'a>, GenerateError> {
    generate_with_report(catalog, tables, config, &SearchConfig::default())
        .map(|generated| generated.deck)
}

/// Runs up to `search.attempts` build-and-anneal rounds and returns the first
/// deck that survives the hard constraints. A lock that cannot be placed
/// fails immediately since no other seed can satisfy it.
pub fn generate_with_report<'a>(
    catalog: &'a Catalog,
    tables: &SynergyTables,
    config: &GenConfig,
    search: &SearchConfig,
) -> Result<Generated<'a>, GenerateError> {
    let started_at = Instant::now();
    let pools = build_pools(catalog, config);
    tracing::debug!(
        seed = %config.seed,
        pool_size = pools.total(),
        attempts = search.attempts,
        "starting deck generation"
    );
    let mut records = Vec::new();

    for attempt in 0..search.attempts {
        let seed = attempt_seed(&config.seed, attempt);
        tracing::debug!(attempt, seed, "attempt");
        // build and anneal share one stream
        let mut rng = XorShift32::new(seed);
        let initial = match create_initial_deck(&pools, config, search, &mut rng) {
            Ok(deck) => deck,
            Err(BuildError::UnsatisfiableLock { role, card }) => {
                tracing::warn!(%role, card = %card, "locked card cannot be placed");
                return Err(GenerateError::UnsatisfiableLock { role, card });
            }
            Err(BuildError::PoolExhausted(role)) => {
                tracing::debug!(attempt, %role, "initial assignment exhausted");
                records.push(AttemptRecord {
                    attempt,
                    seed,
                    outcome: AttemptOutcome::PoolExhausted { role },
                    anneal: None,
                });
                continue;
            }
        };

        let outcome = anneal(&initial, &pools, config, tables, search, &mut rng);
        let stats = outcome.stats;
        if is_hard_fail(stats.best_score) {
            tracing::debug!(attempt, "annealing never left the hard-fail region");
            records.push(AttemptRecord {
                attempt,
                seed,
                outcome: AttemptOutcome::HardFail,
                anneal: Some(stats),
            });
            continue;
        }

        records.push(AttemptRecord {
            attempt,
            seed,
            outcome: AttemptOutcome::Accepted,
            anneal: Some(stats),
        });
        let deck = outcome.deck;
        tracing::info!(
            attempt,
            score = stats.best_score,
            deck = ?deck.names(),
            "deck generated"
        );
        let report = GenerationReport {
            seed: config.seed.clone(),
            deck: deck.names().into_iter().map(str::to_string).collect(),
            score: stats.best_score,
            avg_elixir: deck.avg_elixir(),
            coverage: coverage(deck.cards()),
            breakdown: score_breakdown(deck.cards(), config, tables).ok(),
            attempts: records,
            summary: SummaryStats {
                attempts_run: attempt + 1,
                anneal_steps: search.anneal_steps,
                wall_time_ms: started_at.elapsed().as_millis() as u64,
            },
        };
        return Ok(Generated { deck, report });
    }

    tracing::warn!(
        attempts = search.attempts,
        "no attempt produced a deck that satisfies the hard constraints"
    );
    Err(GenerateError::Exhausted {
        attempts: search.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::{score_deck, Card, CardKind, Role, RoleLock, Tag};

    fn catalog() -> Catalog {
        let mut cards = vec![
            Card::new("Hog Rider", 4, Role::Wincon, CardKind::Troop).with_tags(&[Tag::Cycle]),
            Card::new("Giant", 5, Role::Wincon, CardKind::Troop).with_tags(&[Tag::Beatdown]),
            Card::new("Zap", 2, Role::SpellSmall, CardKind::Spell)
                .with_tags(&[Tag::SwarmAnswer, Tag::Reset]),
            Card::new("The Log", 2, Role::SpellSmall, CardKind::Spell)
                .with_tags(&[Tag::SwarmAnswer]),
            Card::new("Fireball", 4, Role::SpellBig, CardKind::Spell).with_tags(&[Tag::Splash]),
            Card::new("Cannon", 3, Role::Building, CardKind::Building),
            Card::new("Tesla", 4, Role::Building, CardKind::Building).with_tags(&[Tag::Air]),
        ];
        for idx in 0..8u8 {
            cards.push(Card::new(
                format!("Support {idx}"),
                1 + idx % 4,
                Role::Support,
                CardKind::Troop,
            ));
        }
        Catalog::new(cards).expect("catalog")
    }

    fn quick() -> SearchConfig {
        SearchConfig {
            attempts: 5,
            anneal_steps: 150,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn attempt_seed_mixes_base_and_index() {
        assert_eq!(attempt_seed("CLASH-SEED", 0), 3_091_597_274);
        assert_ne!(attempt_seed("CLASH-SEED", 1), attempt_seed("CLASH-SEED", 0));
    }

    #[test]
    fn first_valid_attempt_wins() {
        let catalog = catalog();
        let config = GenConfig::default();
        let tables = SynergyTables::default();
        let generated =
            generate_with_report(&catalog, &tables, &config, &quick()).expect("generate");
        assert_eq!(generated.deck.len(), 8);
        assert!(!generated.deck.has_duplicates());
        assert_eq!(
            generated.report.score,
            score_deck(generated.deck.cards(), &config, &tables)
        );
        let last = generated.report.attempts.last().expect("attempt record");
        assert_eq!(last.outcome, AttemptOutcome::Accepted);
        assert_eq!(
            generated.report.summary.attempts_run as usize,
            generated.report.attempts.len()
        );
    }

    #[test]
    fn unsatisfiable_lock_aborts_without_retrying() {
        let catalog = catalog();
        let mut config = GenConfig::default();
        config
            .role_locks
            .set(Role::Wincon, RoleLock::Card("Golem".to_string()));
        let err = generate_with_report(&catalog, &SynergyTables::default(), &config, &quick())
            .expect_err("lock cannot be met");
        assert_eq!(
            err,
            GenerateError::UnsatisfiableLock {
                role: Role::Wincon,
                card: "Golem".to_string()
            }
        );
    }

    #[test]
    fn impossible_quota_exhausts_every_attempt() {
        let catalog = catalog();
        let config = GenConfig {
            big_spell_count: 2,
            ..GenConfig::default()
        };
        let err = generate_with_report(&catalog, &SynergyTables::default(), &config, &quick())
            .expect_err("one big spell in catalog");
        assert_eq!(err, GenerateError::Exhausted { attempts: 5 });
    }

    #[test]
    fn zero_attempts_is_exhausted() {
        let catalog = catalog();
        let search = SearchConfig {
            attempts: 0,
            ..quick()
        };
        let err = generate_with_report(
            &catalog,
            &SynergyTables::default(),
            &GenConfig::default(),
            &search,
        )
        .expect_err("no attempts");
        assert_eq!(err, GenerateError::Exhausted { attempts: 0 });
    }
}
