//! End-to-end marking pipeline tests.
//!
//! Drives the binary over a directory of answers, then inspects the saved
//! reports: format fan-out, the gated disclosure boundary in the JSON, and
//! determinism across runs.

use assert_cmd::Command;
use tempfile::TempDir;

fn casemark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("casemark").unwrap()
}

const SCORED_ANSWER: &str = "\
Failure 1: residents never gave consent and the association offered no
transparency about the new cameras. Failure 2: the system is biased and the
harm lands on the residents it keeps locking out, which erodes trust in the
association. The association should consult the residents properly and
complete a DPIA, then take action on what it finds.";

fn write_answers(dir: &TempDir) -> std::path::PathBuf {
    let answers = dir.path().join("answers");
    std::fs::create_dir_all(&answers).unwrap();
    std::fs::write(answers.join("alice.txt"), SCORED_ANSWER).unwrap();
    std::fs::write(answers.join("bob.txt"), "not nearly enough words").unwrap();
    answers
}

fn saved_reports(out: &std::path::Path, ext: &str) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect()
}

#[test]
fn format_all_writes_json_html_and_markdown() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(&dir);
    let out = dir.path().join("out");

    casemark()
        .arg("mark")
        .arg("--answer")
        .arg(&answers)
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("all")
        .assert()
        .success();

    assert_eq!(saved_reports(&out, "json").len(), 1);
    assert_eq!(saved_reports(&out, "html").len(), 1);
    assert_eq!(saved_reports(&out, "md").len(), 1);
}

#[test]
fn json_report_enforces_the_disclosure_boundary() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(&dir);
    let out = dir.path().join("out");

    casemark()
        .arg("mark")
        .arg("--answer")
        .arg(&answers)
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let json_path = saved_reports(&out, "json").pop().unwrap();
    let content = std::fs::read_to_string(&json_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();

    let answers = report["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 2);

    // Sorted by file name: alice.txt scored, bob.txt gated.
    let alice = &answers[0];
    assert_eq!(alice["source"], "alice.txt");
    assert_eq!(alice["assessment"]["status"], "scored");
    let score = alice["assessment"]["score"].as_u64().unwrap();
    assert!(score <= 10);
    assert!(alice["assessment"]["model_answer"].as_str().is_some());
    assert_eq!(alice["assessment"]["grid"].as_array().unwrap().len(), 5);
    assert_eq!(alice["assessment"]["tags"].as_array().unwrap().len(), 5);

    let bob = &answers[1];
    assert_eq!(bob["source"], "bob.txt");
    assert_eq!(bob["assessment"]["status"], "gated");
    assert!(bob["assessment"].get("score").is_none());
    assert!(bob["assessment"].get("model_answer").is_none());
    assert!(bob["assessment"].get("grid").is_none());

    assert_eq!(report["cohort"]["total"], 2);
    assert_eq!(report["cohort"]["gated"], 1);
}

#[test]
fn marking_is_deterministic_across_runs() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(&dir);

    let mut reports = Vec::new();
    for run in 0..2 {
        let out = dir.path().join(format!("out-{run}"));
        casemark()
            .arg("mark")
            .arg("--answer")
            .arg(&answers)
            .arg("--output")
            .arg(&out)
            .arg("--format")
            .arg("json")
            .assert()
            .success();
        let json_path = saved_reports(&out, "json").pop().unwrap();
        let content = std::fs::read_to_string(&json_path).unwrap();
        let report: serde_json::Value = serde_json::from_str(&content).unwrap();
        reports.push(report);
    }

    // Report ids and timestamps differ; the assessments must not.
    assert_eq!(reports[0]["answers"], reports[1]["answers"]);
    assert_eq!(reports[0]["cohort"], reports[1]["cohort"]);
}
