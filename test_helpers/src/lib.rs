//! Test helpers shared across the buildconfig crates.
//!
//! - [`figment`] runs manifest loading inside an isolated `figment::Jail`.
//! - [`output`] inspects trees of generated units.

pub mod figment;
pub mod output;
