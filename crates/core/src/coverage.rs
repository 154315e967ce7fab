use crate::{Card, Tag};
use serde::{Deserialize, Serialize};

/// Tactical capabilities every deck is expected to have at least once.
pub const COVERAGE_TAGS: [Tag; 4] = [Tag::SwarmAnswer, Tag::Splash, Tag::Air, Tag::Reset];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub swarm: bool,
    pub splash: bool,
    pub air: bool,
    pub reset: bool,
}

impl Coverage {
    pub fn flags(&self) -> [(Tag, bool); 4] {
        [
            (Tag::SwarmAnswer, self.swarm),
            (Tag::Splash, self.splash),
            (Tag::Air, self.air),
            (Tag::Reset, self.reset),
        ]
    }

    pub fn missing(&self) -> usize {
        self.flags().iter().filter(|(_, present)| !present).count()
    }
}

pub fn has_tag(cards: &[&Card], tag: Tag) -> bool {
    cards.iter().any(|card| card.has_tag(tag))
}

pub fn count_tag(cards: &[&Card], tag: Tag) -> usize {
    cards.iter().filter(|card| card.has_tag(tag)).count()
}

pub fn coverage(cards: &[&Card]) -> Coverage {
    Coverage {
        swarm: has_tag(cards, Tag::SwarmAnswer),
        splash: has_tag(cards, Tag::Splash),
        air: has_tag(cards, Tag::Air),
        reset: has_tag(cards, Tag::Reset),
    }
}
