use clap::ValueEnum;
use deckforge_core::{coverage, BiasSliders, Deck, GenConfig, Tag, Weights};
use deckforge_optimizer::Generated;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Names separated by bullets, followed by a summary line
    List,
    /// Names separated by semicolons, for deck-builder sites
    Royale,
    /// Deck names plus the settings that produced them
    Json,
    /// Full generation report with every attempt
    Report,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    deck: Vec<&'a str>,
    settings: ExportSettings<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSettings<'a> {
    seed: &'a str,
    target_avg: f64,
    wincon_count: u8,
    small_spell_count: u8,
    big_spell_count: u8,
    include_def_building: bool,
    allow_extra_wincon_building: bool,
    allow_champions: bool,
    champion_cap: u8,
    weights: &'a Weights,
    bias_sliders: &'a BiasSliders,
}

pub fn deck_as_list(names: &[&str]) -> String {
    names.join(" • ")
}

pub fn royale_api_text(names: &[&str]) -> String {
    names.join("; ")
}

pub fn json_export(names: &[&str], config: &GenConfig) -> serde_json::Result<String> {
    let export = JsonExport {
        deck: names.to_vec(),
        settings: ExportSettings {
            seed: &config.seed,
            target_avg: config.target_avg,
            wincon_count: config.wincon_count,
            small_spell_count: config.small_spell_count,
            big_spell_count: config.big_spell_count,
            include_def_building: config.include_def_building,
            allow_extra_wincon_building: config.allow_extra_wincon_building,
            allow_champions: config.allow_champions,
            champion_cap: config.champion_cap,
            weights: &config.weights,
            bias_sliders: &config.bias_sliders,
        },
    };
    serde_json::to_string_pretty(&export)
}

pub fn summary_line(deck: &Deck<'_>) -> String {
    let flags: Vec<String> = coverage(deck.cards())
        .flags()
        .iter()
        .map(|(tag, present)| {
            let mark = if *present { "yes" } else { "no" };
            format!("{} {mark}", tag_label(*tag))
        })
        .collect();
    format!("avg elixir {:.2} | {}", deck.avg_elixir(), flags.join(" "))
}

fn tag_label(tag: Tag) -> &'static str {
    match tag {
        Tag::SwarmAnswer => "swarm",
        other => other.id(),
    }
}

pub fn render(
    format: Format,
    generated: &Generated<'_>,
    config: &GenConfig,
) -> anyhow::Result<String> {
    let names = generated.deck.names();
    let text = match format {
        Format::List => format!("{}\n{}", deck_as_list(&names), summary_line(&generated.deck)),
        Format::Royale => royale_api_text(&names),
        Format::Json => json_export(&names, config)?,
        Format::Report => generated.report.to_text_report(),
    };
    Ok(text)
}
