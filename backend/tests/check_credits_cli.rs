//! End-to-end tests for the `check-credits` binary.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::io::Write;
use std::process::{Command, Output};

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const SERIES: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";

#[fixture]
fn single_payer_snapshot() -> Value {
    json!({
        "users": [{ "id": OWNER, "fullName": "Olive Owner", "credits": 4 }],
        "reservation": {
            "seriesId": SERIES,
            "ownerId": OWNER,
            "creditsRequired": 5,
            "creditsConsumed": 0
        }
    })
}

fn run(snapshot: &Value, args: &[&str], enabled: Option<&str>) -> Output {
    let mut file = NamedTempFile::new().expect("create snapshot file");
    file.write_all(snapshot.to_string().as_bytes())
        .expect("write snapshot");

    let mut command = Command::new(env!("CARGO_BIN_EXE_check-credits"));
    command
        .arg("--snapshot")
        .arg(file.path())
        .args(args)
        .env_remove("CREDITS_CATALOGUE_PATH")
        .env_remove("RUST_LOG");
    match enabled {
        Some(value) => command.env("CREDITS_ENABLED", value),
        None => command.env_remove("CREDITS_ENABLED"),
    };
    command.output().expect("run check-credits")
}

#[rstest]
fn enforced_shortfall_prints_rendered_message(single_payer_snapshot: Value) {
    let output = run(&single_payer_snapshot, &["--enforce"], None);

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Not enough credits. This reservation requires 5 credits but only 4 are available."
    );
}

#[rstest]
fn flag_from_environment_decides_without_enforce(single_payer_snapshot: Value) {
    let disabled = run(&single_payer_snapshot, &[], Some("false"));
    let enabled = run(&single_payer_snapshot, &[], Some("true"));

    assert!(disabled.status.success());
    assert_eq!(String::from_utf8_lossy(&disabled.stdout).trim_end(), "valid");
    assert!(!enabled.status.success());
}

#[rstest]
fn consumed_credits_admit_the_series(mut single_payer_snapshot: Value) {
    single_payer_snapshot["reservation"]["creditsConsumed"] = json!("1");

    let output = run(&single_payer_snapshot, &["--enforce"], None);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "valid");
}

#[rstest]
fn unknown_owner_prints_the_failure_as_json(mut single_payer_snapshot: Value) {
    single_payer_snapshot["users"] = json!([]);

    let output = run(&single_payer_snapshot, &["--enforce"], None);

    assert_eq!(output.status.code(), Some(2));
    let failure: Value = serde_json::from_slice(&output.stdout).expect("failure is JSON");
    assert_eq!(failure["code"], json!("internal_error"));
    assert_eq!(failure["details"]["rule"], json!("credits"));
    assert_eq!(failure["details"]["seriesId"], json!(SERIES));
    assert!(
        failure["message"]
            .as_str()
            .is_some_and(|message| message.contains(OWNER)),
        "message should name the missing user: {failure}"
    );
}
