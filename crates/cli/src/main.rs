//! `deckforge`: roll a seeded 8-card deck and print it.
//!
//! Usage:
//!   deckforge --seed MY-SEED --preset ladder --lock wincon="Hog Rider"
//!   RUST_LOG=debug deckforge --format report

mod export;

use anyhow::{bail, Context};
use clap::Parser;
use deckforge_core::{GenConfig, Preset, Role, RoleLock};
use deckforge_data::{builtin_assets, load_assets, load_config};
use deckforge_optimizer::{
    generate_with_report, write_json, write_text, GenerateError, SearchConfig,
};
use export::Format;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deckforge")]
#[command(about = "Generate a seeded 8-card deck under role quotas and synergy scoring")]
struct Args {
    /// Settings file (JSON, camelCase keys); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding cards.json and synergy.json; built-in data otherwise
    #[arg(long)]
    assets: Option<PathBuf>,
    #[arg(long)]
    seed: Option<String>,
    /// ladder, classic, 2v2 or draft
    #[arg(long, value_parser = parse_preset)]
    preset: Option<Preset>,
    #[arg(long)]
    wincons: Option<u8>,
    #[arg(long)]
    small_spells: Option<u8>,
    #[arg(long)]
    big_spells: Option<u8>,
    #[arg(long)]
    target_avg: Option<f64>,
    #[arg(long)]
    champion_cap: Option<u8>,
    #[arg(long)]
    no_champions: bool,
    /// Leave out the defensive building slot
    #[arg(long)]
    no_building: bool,
    /// Allow a defensive building next to a building win condition
    #[arg(long)]
    extra_wincon_building: bool,
    #[arg(long)]
    prefer_evo: bool,
    /// ROLE=CARD or ROLE=any, repeatable
    #[arg(long = "lock", value_name = "ROLE=CARD", value_parser = parse_lock)]
    locks: Vec<(Role, RoleLock)>,
    #[arg(long, value_delimiter = ',')]
    blacklist: Vec<String>,
    /// Restrict picks to these cards
    #[arg(long, value_delimiter = ',')]
    owned: Vec<String>,
    #[arg(long, value_enum, default_value_t = Format::List)]
    format: Format,
    /// Also write the generation report here (.json for JSON, text otherwise)
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn parse_preset(value: &str) -> Result<Preset, String> {
    Preset::from_id(value).ok_or_else(|| {
        let known: Vec<&str> = Preset::ALL.iter().map(|preset| preset.id()).collect();
        format!("unknown preset {value:?}, expected one of {}", known.join(", "))
    })
}

fn parse_lock(value: &str) -> Result<(Role, RoleLock), String> {
    let (role, card) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ROLE=CARD, got {value:?}"))?;
    let role = Role::from_id(role).ok_or_else(|| format!("unknown role {role:?}"))?;
    let card = card.trim();
    if card.is_empty() {
        return Err(format!("missing card name for role {role}"));
    }
    let lock = if card.eq_ignore_ascii_case("any") {
        RoleLock::Any
    } else {
        RoleLock::Card(card.to_string())
    };
    Ok((role, lock))
}

fn build_config(args: &Args) -> anyhow::Result<GenConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => GenConfig::default(),
    };
    if let Some(preset) = args.preset {
        config.apply_preset(preset);
    }
    if let Some(seed) = args.seed.as_ref() {
        config.seed = seed.clone();
    }
    if let Some(count) = args.wincons {
        config.wincon_count = count;
    }
    if let Some(count) = args.small_spells {
        config.small_spell_count = count;
    }
    if let Some(count) = args.big_spells {
        config.big_spell_count = count;
    }
    if let Some(avg) = args.target_avg {
        config.target_avg = avg;
    }
    if let Some(cap) = args.champion_cap {
        config.champion_cap = cap;
    }
    if args.no_champions {
        config.allow_champions = false;
    }
    if args.no_building {
        config.include_def_building = false;
    }
    if args.extra_wincon_building {
        config.allow_extra_wincon_building = true;
    }
    if args.prefer_evo {
        config.prefer_evo = true;
    }
    for (role, lock) in &args.locks {
        config.role_locks.set(*role, lock.clone());
    }
    config.blacklist.extend(args.blacklist.iter().cloned());
    if !args.owned.is_empty() {
        config.owned_only = true;
        config.owned.extend(args.owned.iter().cloned());
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let assets = match args.assets.as_deref() {
        Some(dir) => load_assets(dir)?,
        None => builtin_assets()?,
    };
    tracing::debug!(cards = assets.catalog.len(), seed = %config.seed, "assets loaded");

    let search = SearchConfig::default();
    let result = generate_with_report(&assets.catalog, &assets.synergy, &config, &search);
    let generated = match result {
        Ok(generated) => generated,
        Err(err @ GenerateError::Exhausted { .. }) => {
            bail!("{err}; try loosening locks, the blacklist or the owned list")
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(path) = args.trace.as_deref() {
        let as_json = path.extension().is_some_and(|ext| ext == "json");
        let written = if as_json {
            write_json(path, &generated.report)
        } else {
            write_text(path, &generated.report)
        };
        written.with_context(|| format!("write {}", path.display()))?;
    }

    println!("{}", export::render(args.format, &generated, &config)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("deckforge").chain(argv.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn defaults_without_flags() {
        let config = build_config(&parse(&[])).expect("config");
        assert_eq!(config, GenConfig::default());
    }

    #[test]
    fn locks_accept_card_names_and_wildcards() {
        let args = parse(&["--lock", "wincon=Hog Rider", "--lock", "small=any"]);
        let config = build_config(&args).expect("config");
        assert_eq!(config.role_locks.get(Role::Wincon).card(), Some("Hog Rider"));
        assert!(config.role_locks.get(Role::SpellSmall).is_any());
    }

    #[test]
    fn malformed_lock_is_rejected() {
        let argv = ["deckforge", "--lock", "tower=Hog Rider"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["deckforge", "--lock", "Hog Rider"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn flags_override_preset_and_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"seed": "from-file", "targetAvg": 4.0}"#).expect("write");
        let path_arg = path.to_string_lossy().to_string();
        let args = parse(&[
            "--config",
            &path_arg,
            "--preset",
            "2v2",
            "--wincons",
            "1",
            "--blacklist",
            "Rocket,Golem",
        ]);
        let config = build_config(&args).expect("config");
        assert_eq!(config.seed, "from-file");
        // preset replaces the file's target average
        assert_eq!(config.target_avg, 3.8);
        assert_eq!(config.wincon_count, 1);
        assert_eq!(config.blacklist, vec!["Rocket", "Golem"]);
    }

    #[test]
    fn out_of_range_flag_fails_validation() {
        let args = parse(&["--small-spells", "3"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn owned_list_turns_on_owned_only() {
        let args = parse(&["--owned", "Knight,Archers"]);
        let config = build_config(&args).expect("config");
        assert!(config.owned_only);
        assert_eq!(config.owned.len(), 2);
    }

    #[test]
    fn run_writes_trace_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace = dir.path().join("trace.json");
        let trace_arg = trace.to_string_lossy().to_string();
        let args = parse(&["--seed", "cli-test", "--format", "royale", "--trace", &trace_arg]);
        run(args).expect("run");
        let raw = fs::read_to_string(&trace).expect("read trace");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse trace");
        assert_eq!(value["seed"], "cli-test");
        assert_eq!(value["deck"].as_array().map(Vec::len), Some(8));
    }
}
