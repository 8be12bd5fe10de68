//! `rstest-bdd` scaffolding for `cargo-buildconfig`.
//!
//! Scenarios run the compiled binary against manifests written to a
//! temporary directory and inspect the generated tree.

#[path = "../common/mod.rs"]
mod common;
mod fixtures;
mod scenarios;
mod steps;
