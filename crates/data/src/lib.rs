//! Card catalog, synergy tables and generator settings, from disk or built in.

pub mod load;

pub use load::*;
