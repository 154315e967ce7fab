use crate::{Card, Role};
use std::collections::HashSet;
use thiserror::Error;

pub const MIN_CARD_COST: u8 = 1;
pub const MAX_CARD_COST: u8 = 8;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate card name: {0}")]
    DuplicateCard(String),
    #[error("card {name} has cost {cost}, expected 1..=8")]
    InvalidCost { name: String, cost: u8 },
    #[error("card with empty name")]
    EmptyName,
}

/// The fixed reference list of cards. Order is preserved everywhere pools are derived.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for card in &cards {
            if card.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !(MIN_CARD_COST..=MAX_CARD_COST).contains(&card.cost) {
                return Err(CatalogError::InvalidCost {
                    name: card.name.clone(),
                    cost: card.cost,
                });
            }
            if !seen.insert(card.name.as_str()) {
                return Err(CatalogError::DuplicateCard(card.name.clone()));
            }
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |card| card.role == role)
    }
}
