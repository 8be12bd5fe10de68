//! Step definitions for `cargo-buildconfig` behavioural tests.

use std::fs;
use std::process::Command;

use anyhow::{Context, Result, anyhow, ensure};
use buildconfig::cipher;
use rstest_bdd_macros::{given, then, when};
use test_helpers::figment::MANIFEST_FILE;
use test_helpers::output::GeneratedTree;

use crate::common::cargo_buildconfig_exe;
use crate::fixtures::GenerateContext;

const STRING_AND_SECRET: &str = r#"
package_name = "com.example.app"
secret_key_file_name = "SecretKeys.kt"

[[properties]]
type = "string"
name = "apiUrl"
value = "https://example.com"

[[properties]]
type = "secret"
name = "token"
value = "abc123"
key = "key1"

[[source_sets]]
name = "androidMain"

[[source_sets.properties]]
type = "bool"
name = "debug"
value = true
"#;

const SECRET_WITHOUT_UNIT: &str = r#"
package_name = "com.example.app"

[[properties]]
type = "secret"
name = "token"
value = "abc123"
key = "key1"
"#;

fn write_manifest(ctx: &GenerateContext, contents: &str) -> Result<()> {
    ensure!(ctx.workdir.is_empty(), "manifest already written");
    let dir = tempfile::tempdir().context("create scenario directory")?;
    fs::write(dir.path().join(MANIFEST_FILE), contents).context("write manifest")?;
    ctx.workdir.set(dir);
    Ok(())
}

fn run(ctx: &GenerateContext, extra: &[&str]) -> Result<()> {
    let exe = cargo_buildconfig_exe().map_err(|err| anyhow!(err))?;
    let workdir = ctx.workdir_path()?;
    let mut command = Command::new(exe.as_str());
    command
        .current_dir(workdir.as_str())
        .env_clear()
        .env("RUST_LOG", "info")
        .envs(ctx.env.get().unwrap_or_default())
        .arg("buildconfig")
        .args(extra);
    let output = command.output().context("spawn cargo-buildconfig")?;
    ctx.output.set(output);
    Ok(())
}

#[given("a manifest with a string property and a secret")]
fn manifest_with_secret(generate_context: &GenerateContext) -> Result<()> {
    write_manifest(generate_context, STRING_AND_SECRET)
}

#[given("a manifest with a secret but no secret unit name")]
fn manifest_without_secret_unit(generate_context: &GenerateContext) -> Result<()> {
    write_manifest(generate_context, SECRET_WITHOUT_UNIT)
}

#[given("a manifest whose secret reads its value from \"{var}\"")]
fn manifest_with_env_secret(generate_context: &GenerateContext, var: String) -> Result<()> {
    let contents = format!(
        "package_name = \"com.example.app\"\n\
         secret_key_file_name = \"SecretKeys.kt\"\n\n\
         [[properties]]\n\
         type = \"secret\"\n\
         name = \"token\"\n\
         value_env = \"{var}\"\n\
         key = \"key1\"\n"
    );
    write_manifest(generate_context, &contents)
}

#[given("the environment variable \"{var}\" is \"{value}\"")]
fn environment_variable(generate_context: &GenerateContext, var: String, value: String) -> Result<()> {
    let mut env = generate_context.env.take().unwrap_or_default();
    env.push((var, value));
    generate_context.env.set(env);
    Ok(())
}

#[when("cargo-buildconfig runs")]
fn runs(generate_context: &GenerateContext) -> Result<()> {
    run(generate_context, &[])
}

#[when("cargo-buildconfig runs with \"{args}\"")]
fn runs_with(generate_context: &GenerateContext, args: String) -> Result<()> {
    let extra: Vec<&str> = args.split_whitespace().collect();
    run(generate_context, &extra)
}

#[then("the command succeeds")]
fn command_succeeds(generate_context: &GenerateContext) -> Result<()> {
    let output = generate_context.last_output()?;
    ensure!(
        output.status.success(),
        "cargo-buildconfig failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

#[then("the command fails with \"{message}\"")]
fn command_fails(generate_context: &GenerateContext, message: String) -> Result<()> {
    let output = generate_context.last_output()?;
    ensure!(!output.status.success(), "cargo-buildconfig unexpectedly succeeded");
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        stderr.contains(&message),
        "stderr does not mention {message:?}: {stderr}"
    );
    Ok(())
}

#[then("the file \"{path}\" contains \"{text}\"")]
fn file_contains(generate_context: &GenerateContext, path: String, text: String) -> Result<()> {
    let tree = GeneratedTree::open(generate_context.generated_root()?)?;
    let contents = tree.read(&path)?;
    ensure!(contents.contains(&text), "{path} does not contain {text:?}:\n{contents}");
    Ok(())
}

#[then("the file \"{path}\" exists")]
fn file_exists(generate_context: &GenerateContext, path: String) -> Result<()> {
    let tree = GeneratedTree::open(generate_context.generated_root()?)?;
    ensure!(tree.exists(&path), "{path} was not generated");
    Ok(())
}

#[then("the file \"{path}\" does not exist")]
fn file_missing(generate_context: &GenerateContext, path: String) -> Result<()> {
    let tree = GeneratedTree::open(generate_context.generated_root()?)?;
    ensure!(!tree.exists(&path), "{path} should not be generated");
    Ok(())
}

#[then("no files are generated")]
fn nothing_generated(generate_context: &GenerateContext) -> Result<()> {
    let root = generate_context.generated_root()?;
    ensure!(!root.exists(), "{root} should not exist");
    Ok(())
}

#[then("the sealed secret in \"{path}\" decrypts to \"{plaintext}\" with key \"{key}\"")]
fn secret_decrypts(
    generate_context: &GenerateContext,
    path: String,
    plaintext: String,
    key: String,
) -> Result<()> {
    let tree = GeneratedTree::open(generate_context.generated_root()?)?;
    let contents = tree.read(&path)?;
    let start = contents
        .find(cipher::FORMAT_TAG)
        .ok_or_else(|| anyhow!("{path} holds no sealed payload"))?;
    let sealed: String = contents
        .get(start..)
        .unwrap_or_default()
        .chars()
        .take_while(|ch| *ch != '"')
        .collect();
    let opened = cipher::decrypt(&sealed, &key);
    ensure!(opened == plaintext, "decrypted {opened:?}, expected {plaintext:?}");
    Ok(())
}
