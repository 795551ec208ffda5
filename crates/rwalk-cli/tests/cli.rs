use std::io::Write;
use std::process::{Command, Output};

fn rwalk_with_log(args: &[&str], log: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_rwalk"));
    command.args(args).env_remove("RUST_LOG");
    if let Some(log) = log {
        command.env("RUST_LOG", log);
    }
    command.output().expect("failed to run rwalk")
}

fn rwalk(args: &[&str]) -> Output {
    rwalk_with_log(args, Some("off"))
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn generate_prints_the_lehmer_sequence() {
    let output = rwalk(&["generate", "--generator", "one-term", "-n", "2"]);
    assert!(output.status.success());

    let values: Vec<f64> = stdout_lines(&output)
        .iter()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], 168_070.0 / 2_147_483_647.0);
    assert_eq!(values[1], 677_268_843.0 / 2_147_483_647.0);
}

#[test]
fn walk_reports_arrival_as_json() {
    let output = rwalk(&[
        "walk",
        "--kind",
        "non-reversing",
        "--steps",
        "0",
        "--start",
        "-2,5",
        "--generator",
        "two-term",
    ]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let report: serde_json::Value = serde_json::from_str(lines.last().unwrap()).unwrap();
    assert_eq!(report["kind"], "non_reversing");
    assert_eq!(report["outcome"]["arrived"]["x"], -2);
    assert_eq!(report["outcome"]["arrived"]["y"], 5);
    assert_eq!(report["distance"], 0.0);
}

#[test]
fn walk_streams_one_event_per_step() {
    let output = rwalk(&[
        "walk",
        "--kind",
        "random",
        "--steps",
        "7",
        "--generator",
        "native",
        "--seed",
        "9",
        "--events",
    ]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 8);
    for line in &lines[..7] {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["mode"], "forward");
    }
}

#[test]
fn config_file_supplies_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "kind: self_avoiding\nsteps: 3\nbacktrack: true\ngenerator:\n  type: one_term\n"
    )
    .unwrap();

    let path = file.path().to_str().unwrap();
    let output = rwalk(&["--config", path, "walk"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(stdout_lines(&output).last().unwrap()).unwrap();
    assert_eq!(report["kind"], "self_avoiding");
    assert_eq!(report["steps"], 3);
    assert!(report["outcome"]["arrived"].is_object());
}

#[test]
fn negative_steps_fail() {
    let output = rwalk(&["walk", "--steps", "-4"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("non-negative"));
}

#[test]
fn rust_log_overrides_the_default_level() {
    let args = ["walk", "--steps", "2", "--generator", "one-term"];

    let quiet = rwalk_with_log(&args, Some("off"));
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());

    let chatty = rwalk_with_log(&args, None);
    assert!(chatty.status.success());
    assert!(String::from_utf8_lossy(&chatty.stderr).contains("Starting walk"));
}

#[test]
fn start_at_the_lattice_edge_fails() {
    let output = rwalk(&["walk", "--steps", "1", "--start", "9223372036854775807,0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("leaves the i64 lattice"));
}
