use crate::{AnnealStats, ReportError};
use deckforge_core::{Coverage, Role, ScoreBreakdown};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The initial assignment ran out of candidates for `role`.
    PoolExhausted { role: Role },
    HardFail,
    Accepted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub seed: u32,
    pub outcome: AttemptOutcome,
    #[serde(default)]
    pub anneal: Option<AnnealStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub attempts_run: u32,
    pub anneal_steps: u32,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: String,
    pub deck: Vec<String>,
    pub score: f64,
    pub avg_elixir: f64,
    pub coverage: Coverage,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
    pub attempts: Vec<AttemptRecord>,
    pub summary: SummaryStats,
}

impl GenerationReport {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("seed: {}", self.seed),
            format!("deck: {}", self.deck.join(", ")),
            format!(
                "score: {:.2} avg_elixir: {:.2} coverage_missing: {}",
                self.score,
                self.avg_elixir,
                self.coverage.missing()
            ),
            format!(
                "summary: attempts={} steps_per_attempt={} wall_ms={}",
                self.summary.attempts_run, self.summary.anneal_steps, self.summary.wall_time_ms
            ),
        ];
        if let Some(breakdown) = self.breakdown.as_ref() {
            lines.push(String::new());
            lines.push("breakdown:".to_string());
            let terms = [
                ("elixir", breakdown.elixir),
                ("coverage", breakdown.coverage),
                ("synergy", breakdown.synergy),
                ("wincon_pairs", breakdown.wincon_pairs),
                ("anti_synergy", breakdown.anti_synergy),
                ("double_building", breakdown.double_building),
                ("bias", breakdown.bias),
                ("evo", breakdown.evo),
                ("presence", breakdown.presence),
                ("card_weights", breakdown.card_weights),
            ];
            for (label, value) in terms {
                if value != 0.0 {
                    lines.push(format!("  {label:<16} {value:>8.2}"));
                }
            }
        }
        lines.push(String::new());
        lines.push("attempts:".to_string());
        for record in &self.attempts {
            let mut row = format!(
                "  attempt {:>2} seed {:>10} | {}",
                record.attempt,
                record.seed,
                outcome_label(&record.outcome)
            );
            if let Some(stats) = record.anneal.as_ref() {
                row.push_str(&format!(
                    " | start {} best {} accepted {} improved {} skipped {}",
                    score_label(stats.initial_score),
                    score_label(stats.best_score),
                    stats.accepted,
                    stats.improved,
                    stats.skipped
                ));
            }
            lines.push(row);
        }
        lines.join("\n")
    }
}

fn outcome_label(outcome: &AttemptOutcome) -> String {
    match outcome {
        AttemptOutcome::PoolExhausted { role } => format!("exhausted ({role})"),
        AttemptOutcome::HardFail => "hard fail".to_string(),
        AttemptOutcome::Accepted => "accepted".to_string(),
    }
}

fn score_label(score: f64) -> String {
    if deckforge_core::is_hard_fail(score) {
        "fail".to_string()
    } else {
        format!("{score:.2}")
    }
}

pub fn write_json(path: &Path, report: &GenerationReport) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &GenerationReport) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}
