//! Checks the emitted Rust decryption helper against the library cipher.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface helper regressions"
)]

use buildconfig::cipher::{self, legacy};
use rstest::rstest;

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    reason = "the helper is emitted for consumers and written against std only"
)]
mod generated {
    include!("../templates/crypto_utils.rs");
}

use generated::crypto_utils::decrypt;

#[rstest]
#[case("abc123", "key1")]
#[case("", "key1")]
#[case("héllo ✓", "ключ")]
#[case("https://example.com/api?token=s3cr3t", "build-key")]
#[case("0123456789abcdefghijklmnopqrstuvwxyz", "k")]
fn opens_library_payloads(#[case] plaintext: &str, #[case] keyword: &str) {
    let sealed = cipher::encrypt(plaintext, keyword);
    assert_eq!(decrypt(&sealed, keyword), plaintext);
}

#[test]
fn opens_known_answer_payload() {
    assert_eq!(
        decrypt("kmbc1:AAAAAAAAAAAAAAAA:YAhMduIYpI6bjbYxRga+og89xF5mlvcGRqObrHD3hVUyYhyA", "build-key"),
        "https://example.com/api?token=s3cr3t"
    );
}

#[rstest]
#[case("Vszzc, Kcfzr!")]
#[case("kmbc1:AAECAwQFBgcICQoL")]
#[case("kmbc1:not*base64:oktcWb3o")]
#[case("kmbc1:AAAA")]
#[case("kmbc1:AAECAwQFBgcICQoL:oktcWb3")]
#[case("kmbc1:AB==:oktcWb3o")]
fn falls_back_like_the_library(#[case] payload: &str) {
    assert_eq!(decrypt(payload, "key1"), cipher::decrypt(payload, "key1"));
}

#[test]
fn opens_legacy_payloads() {
    let legacy = legacy::encrypt("Hello, World!", "key1");
    assert_eq!(decrypt(&legacy, "key1"), "Hello, World!");
}

#[test]
fn helper_template_is_emitted_verbatim() {
    let helper = include_str!("../templates/crypto_utils.rs");
    let options = buildconfig::EmitOptions::new("app", buildconfig::Target::Rust)
        .with_secret_file("secret_keys.rs");
    let mut builder = buildconfig::ConfigBuilder::new();
    builder
        .properties(|props| {
            props.secret("token", "abc123", "key1")?;
            Ok::<(), buildconfig::ModelError>(())
        })
        .expect("declare secret");
    let model = builder.build();
    let scope = model
        .scope(buildconfig::DEFAULT_SCOPE)
        .expect("default scope");
    let rendered = buildconfig::emit::render_scope(scope, &options).expect("render");
    let emitted = rendered.crypto_helper.expect("helper unit");
    assert!(emitted.contents.ends_with(helper));
}
