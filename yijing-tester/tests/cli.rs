use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "yijing-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_yijing-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    assert!(content.contains("cultivator"));
}

#[test]
fn cli_runs_all_strategies_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_yijing-tester");
    let output_path = temp_path("run");
    let status = Command::new(exe)
        .args([
            "--strategies",
            "all",
            "--report",
            "json",
            "--iterations",
            "1",
            "--seeds",
            "1,0x2a",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = report.as_array().expect("array");
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["games_run"] == 2));
}

#[test]
fn cli_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_yijing-tester");
    let output = Command::new(exe)
        .args(["--strategies", "gambler"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown strategy"));
}

#[test]
fn cli_reads_rules_from_disk() {
    let exe = env!("CARGO_BIN_EXE_yijing-tester");
    let config_path = temp_path("rules.json");
    std::fs::write(&config_path, r#"{"victory": {"merit_threshold": 1}}"#).expect("write rules");
    let output_path = temp_path("markdown");
    let status = Command::new(exe)
        .args(["--iterations", "1", "--report", "markdown", "--config"])
        .arg(&config_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("| Steady | 1 | 1 | 1 | 0 |"));
}
