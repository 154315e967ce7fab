use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Wincon,
    Support,
    SpellSmall,
    SpellBig,
    Building,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Wincon,
        Role::Support,
        Role::SpellSmall,
        Role::SpellBig,
        Role::Building,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Wincon => "wincon",
            Self::Support => "support",
            Self::SpellSmall => "spell-small",
            Self::SpellBig => "spell-big",
            Self::Building => "building",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wincon" | "win-condition" => Some(Self::Wincon),
            "support" => Some(Self::Support),
            "spell-small" | "small" | "small-spell" => Some(Self::SpellSmall),
            "spell-big" | "big" | "big-spell" => Some(Self::SpellBig),
            "building" => Some(Self::Building),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Wincon => 0,
            Self::Support => 1,
            Self::SpellSmall => 2,
            Self::SpellBig => 3,
            Self::Building => 4,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Troop,
    Spell,
    Building,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    SwarmAnswer,
    Splash,
    Air,
    Reset,
    AntiBuilding,
    CheapTank,
    Cycle,
    Control,
    Beatdown,
    Evo,
}

impl Tag {
    pub fn id(self) -> &'static str {
        match self {
            Self::SwarmAnswer => "swarm-answer",
            Self::Splash => "splash",
            Self::Air => "air",
            Self::Reset => "reset",
            Self::AntiBuilding => "anti-building",
            Self::CheapTank => "cheap-tank",
            Self::Cycle => "cycle",
            Self::Control => "control",
            Self::Beatdown => "beatdown",
            Self::Evo => "evo",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub name: String,
    pub cost: u8,
    pub role: Role,
    pub kind: CardKind,
    #[serde(default)]
    pub champion: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub weight: f64,
}

impl Card {
    pub fn new(name: impl Into<String>, cost: u8, role: Role, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            cost,
            role,
            kind,
            champion: false,
            tags: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn with_tags(mut self, tags: &[Tag]) -> Self {
        self.tags = tags.to_vec();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn as_champion(mut self) -> Self {
        self.champion = true;
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// A win condition that is itself a building (X-Bow, Mortar, ...).
    pub fn is_building_wincon(&self) -> bool {
        self.role == Role::Wincon && self.kind == CardKind::Building
    }
}
