//! CLI tests for sensortop: help text and resolved configuration via --dry-run (no network).
use assert_cmd::Command;

fn sensortop() -> Command {
    let mut cmd = Command::cargo_bin("sensortop").expect("sensortop binary");
    cmd.env_remove("SENSORTOP_BASE_URL")
        .env_remove("SENSORTOP_SENSOR_ID")
        .env_remove("SENSORTOP_LIMIT");
    cmd
}

fn output_text(out: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let out = sensortop().arg("--help").output().expect("run sensortop --help");
    assert!(out.status.success());
    let text = output_text(&out);
    assert!(
        text.contains("Usage:")
            && text.contains("--url")
            && text.contains("-u")
            && text.contains("--sensor")
            && text.contains("-s")
            && text.contains("--limit")
            && text.contains("-n"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_dry_run_prints_defaults() {
    let out = sensortop().arg("--dry-run").output().expect("run sensortop");
    assert!(out.status.success());
    let text = output_text(&out);
    assert!(text.contains("base_url = http://localhost:4000"), "{text}");
    assert!(text.contains("sensor_id = sensor-1"), "{text}");
    assert!(text.contains("limit = 20"), "{text}");
    assert!(text.contains("poll_interval_secs = 10"), "{text}");
}

#[test]
fn test_flags_override_env() {
    let out = sensortop()
        .env("SENSORTOP_BASE_URL", "http://from-env:1")
        .env("SENSORTOP_SENSOR_ID", "env-sensor")
        .env("SENSORTOP_LIMIT", "7")
        .args(["-s", "cli-sensor", "--limit=12", "--dry-run"])
        .output()
        .expect("run sensortop");
    assert!(out.status.success());
    let text = output_text(&out);
    assert!(text.contains("base_url = http://from-env:1"), "{text}");
    assert!(text.contains("sensor_id = cli-sensor"), "{text}");
    assert!(text.contains("limit = 12"), "{text}");
}

#[test]
fn test_bad_limit_is_rejected() {
    let out = sensortop()
        .args(["--limit", "0", "--dry-run"])
        .output()
        .expect("run sensortop");
    assert!(!out.status.success());
    assert!(output_text(&out).contains("greater than zero"));
}
