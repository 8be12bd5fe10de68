//! Binds the `cargo-buildconfig` feature files to the step registry.

use crate::fixtures::{GenerateContext, generate_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/generate.feature",
    fixtures = [generate_context: GenerateContext]
);
