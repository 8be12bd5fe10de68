//! Golden rendering tests for both dialects.

use rstest::{fixture, rstest};

use super::*;
use crate::builder::ConfigBuilder;
use crate::error::ModelError;
use crate::model::{DEFAULT_SCOPE, PropertyModel};

const COUNTING_NONCE: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

#[fixture]
fn model() -> PropertyModel {
    let mut builder = ConfigBuilder::new();
    builder
        .properties(|props| {
            props.string("apiUrl", "https://example.com")?;
            props.optional_string("flavor", None)?;
            props.object("feature", |feature| {
                feature.bool("enabled", true)?;
                feature.object("nested", |nested| {
                    nested.int("count", 3)?;
                    Ok::<(), ModelError>(())
                })?;
                Ok::<(), ModelError>(())
            })?;
            props.secret_with_nonce("token", "abc123", "key1", COUNTING_NONCE)?;
            props.long("timeout", 30_000)?;
            Ok::<(), ModelError>(())
        })
        .expect("fixture model is valid");
    builder.build()
}

fn default_scope(model: &PropertyModel) -> &Scope {
    model.scope(DEFAULT_SCOPE).expect("default scope")
}

const KOTLIN_MAIN: &str = r#"package com.example

public object BuildConfig {
  public const val API_URL: String = "https://example.com"
  public val FLAVOR: String? = null

  public object Feature {
    public const val ENABLED: Boolean = true

    public object Nested {
      public const val COUNT: Int = 3
    }
  }

  public const val TIMEOUT: Long = 30000L
}
"#;

const KOTLIN_SECRETS: &str = r#"package com.example

public object SecretKeys {
  public const val TOKEN: String = "kmbc1:AAECAwQFBgcICQoL:oktcWb3o"
  public const val TOKEN_KEY: String = "key1"
}
"#;

const RUST_MAIN: &str = r#"// @generated by buildconfig for package `com.example`. Do not edit.

#[allow(dead_code)]
pub mod build_config {
    pub const API_URL: &str = "https://example.com";
    pub const FLAVOR: Option<&str> = None;

    pub mod feature {
        pub const ENABLED: bool = true;

        pub mod nested {
            pub const COUNT: i32 = 3;
        }
    }

    pub const TIMEOUT: i64 = 30000;
}
"#;

const RUST_SECRETS: &str = r#"// @generated by buildconfig for package `com.example`. Do not edit.

#[allow(dead_code)]
pub mod secret_keys {
    pub const TOKEN: &str = "kmbc1:AAECAwQFBgcICQoL:oktcWb3o";
    pub const TOKEN_KEY: &str = "key1";
}
"#;

#[rstest]
#[case::kotlin(Target::Kotlin, "SecretKeys.kt", "commonMain/com/example", KOTLIN_MAIN, KOTLIN_SECRETS)]
#[case::rust(Target::Rust, "secret_keys.rs", "commonMain", RUST_MAIN, RUST_SECRETS)]
fn renders_golden_units(
    model: PropertyModel,
    #[case] target: Target,
    #[case] secret_file: &str,
    #[case] relative_dir: &str,
    #[case] main: &str,
    #[case] secrets: &str,
) {
    let options = EmitOptions::new("com.example", target).with_secret_file(secret_file);
    let rendered = render_scope(default_scope(&model), &options).expect("render scope");

    assert_eq!(rendered.relative_dir, relative_dir);
    assert_eq!(rendered.main.file_name, target.default_build_config_file());
    assert_eq!(rendered.main.contents, main);
    let secret_unit = rendered.secrets.as_ref().expect("secret unit");
    assert_eq!(secret_unit.file_name, secret_file);
    assert_eq!(secret_unit.contents, secrets);
    let helper = rendered.crypto_helper.as_ref().expect("helper unit");
    assert_eq!(helper.file_name, target.crypto_helper_file());
    assert!(helper.contents.contains("decrypt"));
}

#[rstest]
fn kotlin_helper_is_the_template_under_a_package_header(model: PropertyModel) {
    let options = EmitOptions::new("com.example", Target::Kotlin).with_secret_file("SecretKeys.kt");
    let rendered = render_scope(default_scope(&model), &options).expect("render scope");
    let helper = rendered.crypto_helper.expect("helper unit");
    let expected = format!(
        "package com.example\n\n{}",
        include_str!("../../templates/CryptoUtils.kt")
    );
    assert_eq!(helper.file_name, "CryptoUtils.kt");
    assert_eq!(helper.contents, expected);
}

#[rstest]
fn rendering_is_deterministic(model: PropertyModel) {
    let options = EmitOptions::new("com.example", Target::Kotlin).with_secret_file("SecretKeys.kt");
    let first = render_scope(default_scope(&model), &options).expect("first render");
    let second = render_scope(default_scope(&model), &options).expect("second render");
    assert_eq!(first, second);
}

#[rstest]
fn secrets_without_secret_unit_fail(model: PropertyModel) {
    let options = EmitOptions::new("com.example", Target::Kotlin);
    let err = render_scope(default_scope(&model), &options).expect_err("secret unit required");
    assert!(matches!(
        err,
        GenerateError::SecretUnitRequired { ref scope, ref property }
            if scope == DEFAULT_SCOPE && property == "token"
    ));
    assert!(err.to_string().starts_with("secret output required"));
}

#[rstest]
fn helper_can_be_disabled(model: PropertyModel) {
    let options = EmitOptions::new("com.example", Target::Rust)
        .with_secret_file("secret_keys.rs")
        .with_crypto_helper(false);
    let rendered = render_scope(default_scope(&model), &options).expect("render scope");
    assert!(rendered.secrets.is_some());
    assert!(rendered.crypto_helper.is_none());
    assert_eq!(rendered.units().count(), 2);
}

#[test]
fn scopes_without_secrets_skip_secret_units() {
    let mut builder = ConfigBuilder::new();
    builder
        .properties(|props| {
            props.double("ratio", 0.5)?;
            Ok::<(), ModelError>(())
        })
        .expect("declare ratio");
    let model = builder.build();
    let options = EmitOptions::new("app", Target::Kotlin).with_secret_file("SecretKeys.kt");
    let rendered = render_scope(default_scope(&model), &options).expect("render scope");
    assert!(rendered.secrets.is_none());
    assert!(rendered.crypto_helper.is_none());
    assert_eq!(
        rendered.main.contents,
        "package app\n\npublic object BuildConfig {\n  public const val RATIO: Double = 0.5\n}\n"
    );
}

#[test]
fn configured_type_names_override_file_stems() {
    let scope = Scope::new(DEFAULT_SCOPE, Vec::new()).expect("empty scope");
    let units = UnitNames {
        build_config_file: Some("Config.kt".to_owned()),
        build_config_type: Some("AppConfig".to_owned()),
        ..UnitNames::default()
    };
    let options = EmitOptions::new("app", Target::Kotlin).with_units(units);
    let rendered = render_scope(&scope, &options).expect("render scope");
    assert_eq!(rendered.main.file_name, "Config.kt");
    assert_eq!(rendered.main.contents, "package app\n\npublic object AppConfig {\n}\n");
}

#[rstest]
#[case("")]
#[case("com..example")]
#[case("com.9example")]
#[case("com/example")]
fn invalid_package_names_are_rejected(#[case] package: &str) {
    let scope = Scope::new(DEFAULT_SCOPE, Vec::new()).expect("empty scope");
    let options = EmitOptions::new(package, Target::Kotlin);
    assert!(matches!(
        render_scope(&scope, &options),
        Err(GenerateError::InvalidPackageName(_))
    ));
}

#[rstest]
#[case("../BuildConfig.kt")]
#[case("nested/BuildConfig.kt")]
#[case("")]
fn unit_names_cannot_escape_their_directory(#[case] file_name: &str) {
    let scope = Scope::new(DEFAULT_SCOPE, Vec::new()).expect("empty scope");
    let units = UnitNames {
        build_config_file: Some(file_name.to_owned()),
        ..UnitNames::default()
    };
    let options = EmitOptions::new("app", Target::Kotlin).with_units(units);
    assert!(matches!(
        render_scope(&scope, &options),
        Err(GenerateError::InvalidUnitName(_))
    ));
}

#[rstest]
#[case("kotlin", Target::Kotlin)]
#[case("Rust", Target::Rust)]
#[case("rs", Target::Rust)]
fn parses_target_names(#[case] name: &str, #[case] expected: Target) {
    assert_eq!(name.parse::<Target>(), Ok(expected));
}

#[rstest]
#[case::secret_over_main(Target::Kotlin, "BuildConfig.kt", "main", "secret")]
#[case::case_insensitive(Target::Kotlin, "buildconfig.KT", "main", "secret")]
#[case::helper_over_secret(Target::Kotlin, "CryptoUtils.kt", "secret", "crypto helper")]
#[case::rust_helper_over_secret(Target::Rust, "crypto_utils.rs", "secret", "crypto helper")]
fn colliding_unit_names_are_rejected(
    model: PropertyModel,
    #[case] target: Target,
    #[case] secret_file: &str,
    #[case] expected_first: &str,
    #[case] expected_second: &str,
) {
    let options = EmitOptions::new("com.example", target)
        .with_secret_file(secret_file);
    let err = render_scope(default_scope(&model), &options).expect_err("unit names collide");
    assert!(matches!(
        err,
        GenerateError::UnitNameCollision { first, second, .. }
            if first == expected_first && second == expected_second
    ));
}

#[rstest]
fn helper_name_is_free_when_the_helper_is_disabled(model: PropertyModel) {
    let options = EmitOptions::new("com.example", Target::Kotlin)
        .with_secret_file("CryptoUtils.kt")
        .with_crypto_helper(false);
    let rendered = render_scope(default_scope(&model), &options).expect("render scope");
    assert_eq!(rendered.units().count(), 2);
}

#[test]
fn main_unit_cannot_take_the_helper_name() {
    let scope = Scope::new(DEFAULT_SCOPE, Vec::new()).expect("empty scope");
    let units = UnitNames {
        build_config_file: Some("CryptoUtils.kt".to_owned()),
        secret_file: Some("SecretKeys.kt".to_owned()),
        ..UnitNames::default()
    };
    let options = EmitOptions::new("app", Target::Kotlin).with_units(units);
    assert!(matches!(
        render_scope(&scope, &options),
        Err(GenerateError::UnitNameCollision { first: "main", second: "crypto helper", .. })
    ));
}
