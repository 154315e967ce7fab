use crate::{Card, Role};
use std::collections::HashSet;

pub const DECK_SIZE: usize = 8;

/// An ordered set of catalog cards. Holds references, so cloning a deck never
/// copies card data and a retained snapshot cannot alias a working copy.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Deck<'a> {
    cards: Vec<&'a Card>,
}

impl<'a> Deck<'a> {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(DECK_SIZE),
        }
    }

    pub fn from_cards(cards: Vec<&'a Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[&'a Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == DECK_SIZE
    }

    pub fn push(&mut self, card: &'a Card) {
        self.cards.push(card);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.iter().any(|card| card.name == name)
    }

    /// Copy of this deck with the card at `index` swapped for `card`.
    pub fn with_replacement(&self, index: usize, card: &'a Card) -> Self {
        let mut cards = self.cards.clone();
        cards[index] = card;
        Self { cards }
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }

    pub fn count_role(&self, role: Role) -> usize {
        crate::count_by_role(&self.cards, role)
    }

    pub fn avg_elixir(&self) -> f64 {
        crate::avg_elixir(&self.cards)
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.cards.len());
        self.cards.iter().any(|card| !seen.insert(card.name.as_str()))
    }
}
