use crate::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SEED: &str = "CLASH-SEED";
pub const MAX_BIAS_SLIDER: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("win condition count must be 1 or 2, got {0}")]
    WinconCount(u8),
    #[error("{role} spell count must be 0..=2, got {count}")]
    SpellCount { role: &'static str, count: u8 },
    #[error("champion cap must be 0 or 1, got {0}")]
    ChampionCap(u8),
    #[error("target average elixir must be within 1..=8, got {0}")]
    TargetAvg(f64),
    #[error("weight {name} must be finite and non-negative, got {value}")]
    Weight { name: &'static str, value: f64 },
    #[error("bias slider {name} must be within 0..=0.5, got {value}")]
    Slider { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weights {
    pub avg_weight: f64,
    pub synergy_weight: f64,
    pub coverage_weight: f64,
    pub bias_air: f64,
    pub bias_cycle: f64,
    pub bias_beatdown: f64,
    pub bias_control: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            avg_weight: 1.0,
            synergy_weight: 1.0,
            coverage_weight: 1.0,
            bias_air: 0.0,
            bias_cycle: 0.0,
            bias_beatdown: 0.0,
            bias_control: 0.0,
        }
    }
}

impl Weights {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("avgWeight", self.avg_weight),
            ("synergyWeight", self.synergy_weight),
            ("coverageWeight", self.coverage_weight),
            ("biasAir", self.bias_air),
            ("biasCycle", self.bias_cycle),
            ("biasBeatdown", self.bias_beatdown),
            ("biasControl", self.bias_control),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasSliders {
    pub air: f64,
    pub cycle: f64,
    pub control: f64,
    pub beatdown: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLock {
    #[default]
    Unlocked,
    /// Reserve at least one slot for this role without naming a card.
    Any,
    Card(String),
}

impl RoleLock {
    pub fn card(&self) -> Option<&str> {
        match self {
            Self::Card(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleLocks {
    pub wincon: RoleLock,
    pub support: RoleLock,
    #[serde(rename = "spell-small")]
    pub spell_small: RoleLock,
    #[serde(rename = "spell-big")]
    pub spell_big: RoleLock,
    pub building: RoleLock,
}

impl RoleLocks {
    pub fn get(&self, role: Role) -> &RoleLock {
        match role {
            Role::Wincon => &self.wincon,
            Role::Support => &self.support,
            Role::SpellSmall => &self.spell_small,
            Role::SpellBig => &self.spell_big,
            Role::Building => &self.building,
        }
    }

    pub fn set(&mut self, role: Role, lock: RoleLock) {
        let slot = match role {
            Role::Wincon => &mut self.wincon,
            Role::Support => &mut self.support,
            Role::SpellSmall => &mut self.spell_small,
            Role::SpellBig => &mut self.spell_big,
            Role::Building => &mut self.building,
        };
        *slot = lock;
    }

    /// Locks in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleLock)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Everything one generation request depends on besides the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenConfig {
    pub seed: String,
    pub target_avg: f64,
    pub allow_champions: bool,
    pub champion_cap: u8,
    pub include_def_building: bool,
    pub allow_extra_wincon_building: bool,
    pub small_spell_count: u8,
    pub big_spell_count: u8,
    pub wincon_count: u8,
    pub weights: Weights,
    pub owned_only: bool,
    pub owned: Vec<String>,
    pub blacklist: Vec<String>,
    pub prefer_evo: bool,
    pub avoid_underleveled: bool,
    pub underleveled: Vec<String>,
    pub bias_sliders: BiasSliders,
    pub role_locks: RoleLocks,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            target_avg: 3.5,
            allow_champions: true,
            champion_cap: 1,
            include_def_building: true,
            allow_extra_wincon_building: false,
            small_spell_count: 1,
            big_spell_count: 1,
            wincon_count: 1,
            weights: Weights::default(),
            owned_only: false,
            owned: Vec::new(),
            blacklist: Vec::new(),
            prefer_evo: false,
            avoid_underleveled: false,
            underleveled: Vec::new(),
            bias_sliders: BiasSliders::default(),
            role_locks: RoleLocks::default(),
        }
    }
}

impl GenConfig {
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.wincon_count) {
            return Err(ConfigError::WinconCount(self.wincon_count));
        }
        if self.small_spell_count > 2 {
            return Err(ConfigError::SpellCount {
                role: "small",
                count: self.small_spell_count,
            });
        }
        if self.big_spell_count > 2 {
            return Err(ConfigError::SpellCount {
                role: "big",
                count: self.big_spell_count,
            });
        }
        if self.champion_cap > 1 {
            return Err(ConfigError::ChampionCap(self.champion_cap));
        }
        if !self.target_avg.is_finite() || !(1.0..=8.0).contains(&self.target_avg) {
            return Err(ConfigError::TargetAvg(self.target_avg));
        }
        for (name, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Weight { name, value });
            }
        }
        let sliders = [
            ("air", self.bias_sliders.air),
            ("cycle", self.bias_sliders.cycle),
            ("control", self.bias_sliders.control),
            ("beatdown", self.bias_sliders.beatdown),
        ];
        for (name, value) in sliders {
            if !(0.0..=MAX_BIAS_SLIDER).contains(&value) {
                return Err(ConfigError::Slider { name, value });
            }
        }
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        let rules = preset.rules();
        self.target_avg = rules.target_avg;
        self.include_def_building = rules.include_def_building;
        self.allow_champions = true;
        self.wincon_count = rules.wincon_count;
        self.weights = rules.weights;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Ladder,
    Classic,
    TwoVTwo,
    DraftAssist,
}

struct PresetRules {
    target_avg: f64,
    include_def_building: bool,
    wincon_count: u8,
    weights: Weights,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Ladder,
        Preset::Classic,
        Preset::TwoVTwo,
        Preset::DraftAssist,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Ladder => "ladder",
            Self::Classic => "classic",
            Self::TwoVTwo => "2v2",
            Self::DraftAssist => "draft",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ladder" => Some(Self::Ladder),
            "classic" => Some(Self::Classic),
            "2v2" | "twovtwo" => Some(Self::TwoVTwo),
            "draft" | "draftassist" | "draft-assist" => Some(Self::DraftAssist),
            _ => None,
        }
    }

    fn rules(self) -> PresetRules {
        let base = Weights::default();
        match self {
            Self::Ladder => PresetRules {
                target_avg: 3.2,
                include_def_building: true,
                wincon_count: 1,
                weights: Weights {
                    synergy_weight: 1.05,
                    coverage_weight: 1.2,
                    bias_cycle: 0.1,
                    bias_control: 0.1,
                    ..base
                },
            },
            Self::Classic => PresetRules {
                target_avg: 3.4,
                include_def_building: true,
                wincon_count: 1,
                weights: Weights {
                    synergy_weight: 1.1,
                    coverage_weight: 1.1,
                    ..base
                },
            },
            Self::TwoVTwo => PresetRules {
                target_avg: 3.8,
                include_def_building: true,
                wincon_count: 2,
                weights: Weights {
                    avg_weight: 0.8,
                    synergy_weight: 1.3,
                    coverage_weight: 1.4,
                    bias_air: 0.2,
                    bias_beatdown: 0.2,
                    bias_control: 0.2,
                    ..base
                },
            },
            Self::DraftAssist => PresetRules {
                target_avg: 3.6,
                include_def_building: false,
                wincon_count: 1,
                weights: Weights {
                    avg_weight: 0.9,
                    synergy_weight: 1.2,
                    coverage_weight: 1.3,
                    bias_air: 0.1,
                    bias_control: 0.1,
                    ..base
                },
            },
        }
    }
}
