use anyhow::Result;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const KNN_BIN: &str = env!("CARGO_BIN_EXE_knn_inference");
const RF_BIN: &str = env!("CARGO_BIN_EXE_rf_inference");
const MAIN_BIN: &str = env!("CARGO_BIN_EXE_surface-predict");

/// Predicts 7.5 for every input.
const STUB_ARTIFACT: &str = r#"{
  "metadata": { "name": "stub", "features": ["radius", "height"] },
  "model": {
    "family": "random_forest",
    "n_features": 2,
    "trees": [{ "kind": "leaf", "value": 7.5 }]
  }
}"#;

fn run(bin: &str, dir: &Path, args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut pipe) = child.stdin.take() {
        // the runner may exit before reading, e.g. when the artifact is missing
        if let Err(e) = pipe.write_all(stdin.as_bytes()) {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }
    Ok(child.wait_with_output()?)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stub_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("knn_model.json"), STUB_ARTIFACT)?;
    std::fs::write(dir.path().join("rf_model.json"), STUB_ARTIFACT)?;
    Ok(dir)
}

#[test]
fn test_knn_runner_prints_prediction() -> Result<()> {
    let dir = stub_dir()?;
    let output = run(KNN_BIN, dir.path(), &[], "3.0\n4.0\n")?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Enter the radius: Enter the height: Predicted Surface Area: 7.50\n"
    );
    Ok(())
}

#[test]
fn test_both_runners_agree_on_the_same_artifact() -> Result<()> {
    let dir = stub_dir()?;

    for input in ["3.0\n4.0\n", "abc\n4.0\n", "1\n"] {
        let knn = run(KNN_BIN, dir.path(), &[], input)?;
        let rf = run(RF_BIN, dir.path(), &[], input)?;
        assert_eq!(stdout(&knn), stdout(&rf), "input {input:?}");
        assert_eq!(knn.status.code(), rf.status.code());
    }
    Ok(())
}

#[test]
fn test_missing_artifact_exits_zero_with_one_error_line() -> Result<()> {
    let dir = TempDir::new()?;
    let output = run(RF_BIN, dir.path(), &[], "3.0\n4.0\n")?;

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("An error occurred:"), "{text}");
    assert!(text.contains("rf_model.json"));
    Ok(())
}

#[test]
fn test_non_numeric_input_exits_zero() -> Result<()> {
    let dir = stub_dir()?;
    let output = run(KNN_BIN, dir.path(), &[], "abc\n")?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Enter the radius: An error occurred: could not convert string to float for radius: 'abc'\n"
    );
    Ok(())
}

#[test]
fn test_closed_stdin_is_reported() -> Result<()> {
    let dir = stub_dir()?;
    let output = run(KNN_BIN, dir.path(), &[], "")?;

    assert!(stdout(&output).ends_with("An error occurred: EOF when reading a line\n"));
    Ok(())
}

#[test]
fn test_strict_exit_codes() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = run(KNN_BIN, dir.path(), &["--strict-exit"], "3\n4\n")?;
    assert_eq!(missing.status.code(), Some(3));

    let dir = stub_dir()?;
    let bad_input = run(KNN_BIN, dir.path(), &["--strict-exit"], "abc\n")?;
    assert_eq!(bad_input.status.code(), Some(2));

    let ok = run(KNN_BIN, dir.path(), &["--strict-exit"], "3\n4\n")?;
    assert_eq!(ok.status.code(), Some(0));
    Ok(())
}

#[test]
fn test_values_from_arguments_skip_prompts() -> Result<()> {
    let dir = stub_dir()?;
    let output = run(RF_BIN, dir.path(), &["--radius", "3", "--height", "4"], "")?;

    assert_eq!(stdout(&output), "Predicted Surface Area: 7.50\n");
    Ok(())
}

#[test]
fn test_model_override_and_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir(dir.path().join("models"))?;
    std::fs::write(dir.path().join("models").join("stub.json"), STUB_ARTIFACT)?;

    let by_flag = run(KNN_BIN, dir.path(), &["--model", "models/stub.json"], "3\n4\n")?;
    assert!(stdout(&by_flag).ends_with("Predicted Surface Area: 7.50\n"));

    std::fs::write(
        dir.path().join("predictor.toml"),
        "[models]\nrandom_forest = \"models/stub.json\"\n",
    )?;
    let by_config = run(RF_BIN, dir.path(), &["--config", "predictor.toml"], "3\n4\n")?;
    assert!(stdout(&by_config).ends_with("Predicted Surface Area: 7.50\n"));
    Ok(())
}

#[test]
fn test_invalid_config_is_reported_on_the_result_line() -> Result<()> {
    let dir = stub_dir()?;
    std::fs::write(dir.path().join("bad.toml"), "[logging]\nlevel = \"loud\"\n")?;

    let output = run(KNN_BIN, dir.path(), &["--config", "bad.toml"], "3\n4\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("An error occurred:"));
    Ok(())
}

#[test]
fn test_family_selection() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("rf_model.json"), STUB_ARTIFACT)?;

    let rf = run(MAIN_BIN, dir.path(), &["--family", "random-forest"], "3\n4\n")?;
    assert!(stdout(&rf).ends_with("Predicted Surface Area: 7.50\n"));

    let knn = run(MAIN_BIN, dir.path(), &[], "3\n4\n")?;
    assert!(stdout(&knn).contains("knn_model.json"));
    Ok(())
}
