//! Seeded deck search over the core scoring API: constrained initial
//! assignment followed by simulated annealing, retried across derived seeds.

mod anneal;
mod builder;
mod config;
mod error;
mod generate;
mod pick;
mod trace;

pub use anneal::*;
pub use builder::*;
pub use config::*;
pub use error::*;
pub use generate::*;
pub use pick::*;
pub use trace::*;
