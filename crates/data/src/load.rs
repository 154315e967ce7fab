use anyhow::{bail, Context};
use deckforge_core::{Card, Catalog, GenConfig, SynergyTables};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const CARDS_FILE: &str = "cards.json";
pub const SYNERGY_FILE: &str = "synergy.json";

const BUILTIN_CARDS: &str = include_str!("../../../assets/cards.json");
const BUILTIN_SYNERGY: &str = include_str!("../../../assets/synergy.json");

/// Catalog and synergy tables that belong together.
#[derive(Debug, Clone)]
pub struct Assets {
    pub catalog: Catalog,
    pub synergy: SynergyTables,
}

pub fn builtin_catalog() -> anyhow::Result<Catalog> {
    parse_catalog(BUILTIN_CARDS).context("parse builtin cards")
}

pub fn builtin_synergy(catalog: &Catalog) -> anyhow::Result<SynergyTables> {
    let tables = serde_json::from_str(BUILTIN_SYNERGY).context("parse builtin synergy")?;
    Ok(prune_synergy(tables, catalog))
}

pub fn builtin_assets() -> anyhow::Result<Assets> {
    let catalog = builtin_catalog()?;
    let synergy = builtin_synergy(&catalog)?;
    Ok(Assets { catalog, synergy })
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn load_synergy(path: &Path, catalog: &Catalog) -> anyhow::Result<SynergyTables> {
    let tables: SynergyTables = load_json(path)?;
    Ok(prune_synergy(tables, catalog))
}

/// Loads `cards.json` and `synergy.json` from `dir`. A missing synergy file
/// means no synergy scoring.
pub fn load_assets(dir: &Path) -> anyhow::Result<Assets> {
    let catalog = load_catalog(&dir.join(CARDS_FILE))?;
    let synergy_path = dir.join(SYNERGY_FILE);
    let synergy = if synergy_path.exists() {
        load_synergy(&synergy_path, &catalog)?
    } else {
        SynergyTables::default()
    };
    Ok(Assets { catalog, synergy })
}

/// Reads a settings file. Missing fields take their defaults; the result is validated.
pub fn load_config(path: &Path) -> anyhow::Result<GenConfig> {
    let config: GenConfig = load_json(path)?;
    config
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(config)
}

fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let cards: Vec<Card> = serde_json::from_str(raw)?;
    if cards.is_empty() {
        bail!("card list is empty");
    }
    Ok(Catalog::new(cards)?)
}

fn prune_synergy(mut tables: SynergyTables, catalog: &Catalog) -> SynergyTables {
    let dropped = tables.retain_known(catalog);
    if dropped > 0 {
        tracing::warn!(dropped, "synergy partners missing from catalog were ignored");
    }
    let unknown: Vec<&str> = tables
        .referenced_names()
        .into_iter()
        .filter(|name| !catalog.contains(name))
        .collect();
    if !unknown.is_empty() {
        tracing::debug!(?unknown, "synergy entries never match this catalog");
    }
    tables
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
