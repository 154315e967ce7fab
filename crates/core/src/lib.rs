//! Deck-construction domain logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod constraints;
pub mod coverage;
pub mod deck;
pub mod rng;
pub mod scoring;
pub mod synergy;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use constraints::*;
pub use coverage::*;
pub use deck::*;
pub use rng::*;
pub use scoring::*;
pub use synergy::*;
