//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn echograde() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("echograde").unwrap()
}

const UNIT_1: &str = "../../exercise-sets/unit-1-everyday.toml";
const UNIT_1_KIM: &str = "../../answer-sheets/unit-1-kim.toml";

#[test]
fn score_identical_text() {
    echograde()
        .args(["score", "--reference", "The cat sat on the mat"])
        .args(["--candidate", "The cat sat on the mat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100 (excellent) PASS"))
        .stdout(predicate::str::contains("6 exact, 0 partial of 6 words"));
}

#[test]
fn score_missing_candidate_is_zero() {
    echograde()
        .args(["score", "--reference", "The cat sat on the mat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0 (needs_improvement) FAIL"));
}

#[test]
fn score_misspelled_word() {
    echograde()
        .args(["score", "--reference", "quick brown fox"])
        .args(["--candidate", "quik brown fox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 77 (good) PASS"))
        .stdout(predicate::str::contains("2 exact, 1 partial of 3 words"));
}

#[test]
fn score_explain_shows_length_penalty() {
    echograde()
        .args(["score", "--reference", "one two three four five"])
        .args([
            "--candidate",
            "one two three four five six seven eight nine ten eleven twelve",
        ])
        .arg("--explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 80 (very_good) PASS"))
        .stdout(predicate::str::contains("length ratio:  2.40"))
        .stdout(predicate::str::contains("length factor: 0.8"));
}

#[test]
fn score_json_output() {
    let output = echograde()
        .args(["score", "--reference", "quick brown fox"])
        .args(["--candidate", "quik brown fox", "--format", "json", "--explain"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["score"], 77);
    assert_eq!(value["band"], "good");
    assert_eq!(value["passed"], true);
    assert_eq!(value["exact_matches"], 2);
    assert_eq!(value["partial_matches"], 1);
    assert_eq!(value["breakdown"]["length_factor"], 1.0);
}

#[test]
fn score_unknown_format_fails() {
    echograde()
        .args(["score", "--reference", "a", "--candidate", "a", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn validate_valid_exercise_set() {
    echograde()
        .args(["validate", "--exercises", UNIT_1])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 exercises"))
        .stdout(predicate::str::contains("All exercise sets valid"));
}

#[test]
fn validate_directory() {
    echograde()
        .args(["validate", "--exercises", "../../exercise-sets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit 1: Everyday English"))
        .stdout(predicate::str::contains("Unit 2: Travel"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("issues.toml");
    std::fs::write(
        &path,
        r#"
[exercise_set]
id = "issues"
name = "Issues"

[[exercises]]
id = "dup"
text = "Hello there"

[[exercises]]
id = "dup"
text = "?!"
"#,
    )
    .unwrap();

    echograde()
        .arg("validate")
        .arg("--exercises")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate exercise ID: dup"))
        .stdout(predicate::str::contains("no words after normalization"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    echograde()
        .args(["validate", "--exercises", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_answer_sheet_text() {
    let dir = TempDir::new().unwrap();

    echograde()
        .args(["grade", "--exercises", UNIT_1, "--answers", UNIT_1_KIM])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("kim :: Unit 1: Everyday English"))
        .stdout(predicate::str::contains("Overall: 71 (good) PASS"))
        .stdout(predicate::str::contains("Accuracy: 75% (3/4 correct, 3 answered)"))
        .stderr(predicate::str::contains("Report saved to"));

    let reports: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(reports.len(), 1);
}

#[test]
fn grade_answer_sheet_json() {
    let dir = TempDir::new().unwrap();

    let output = echograde()
        .args(["grade", "--exercises", UNIT_1, "--answers", UNIT_1_KIM])
        .args(["--format", "json"])
        .arg("--output")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["student"], "kim");
    assert_eq!(report["summary"]["overall_score"], 71);
    assert_eq!(report["summary"]["correct_count"], 3);

    let questions = report["questions"].as_array().unwrap();
    let scores: Vec<i64> = questions
        .iter()
        .map(|q| q["result"]["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![100, 100, 84, 0]);
    assert_eq!(questions[2]["result"]["band"], "very_good");
    assert_eq!(questions[3]["response"], Value::Null);
}

#[test]
fn grade_json_answer_sheet_from_directory() {
    let dir = TempDir::new().unwrap();

    echograde()
        .args(["grade", "--exercises", "../../exercise-sets"])
        .args(["--answers", "../../answer-sheets/unit-2-alex.json"])
        .args(["--set", "unit-2-travel"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("alex :: Unit 2: Travel"))
        .stdout(predicate::str::contains("Overall: 67 (satisfactory) FAIL"));
}

#[test]
fn grade_directory_requires_set() {
    let dir = TempDir::new().unwrap();

    echograde()
        .args(["grade", "--exercises", "../../exercise-sets", "--answers", UNIT_1_KIM])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("choose one with --set"));
}

#[test]
fn grade_unknown_exercise_fails() {
    let dir = TempDir::new().unwrap();

    echograde()
        .args(["grade", "--exercises", UNIT_1])
        .args(["--answers", "../../answer-sheets/unit-1-unknown.toml"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown exercise: giraffe"));
}

#[test]
fn grade_unknown_format_fails() {
    let dir = TempDir::new().unwrap();

    echograde()
        .args(["grade", "--exercises", UNIT_1, "--answers", UNIT_1_KIM])
        .args(["--format", "all"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: all (expected text or json)"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn grade_fills_missing_student_from_config() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("nameless.toml");
    std::fs::write(&sheet, "[[answers]]\nexercise = \"cat\"\nresponse = \"the cat sat\"\n").unwrap();

    echograde()
        .env("ECHOGRADE_STUDENT", "sam")
        .env("HOME", dir.path())
        .args(["grade", "--exercises", UNIT_1, "--answers"])
        .arg(&sheet)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sam :: "));
}

#[test]
fn grade_keeps_student_named_anonymous() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("anonymous.toml");
    std::fs::write(
        &sheet,
        "student = \"anonymous\"\n\n[[answers]]\nexercise = \"cat\"\nresponse = \"the cat sat\"\n",
    )
    .unwrap();

    echograde()
        .env("ECHOGRADE_STUDENT", "sam")
        .env("HOME", dir.path())
        .args(["grade", "--exercises", UNIT_1, "--answers"])
        .arg(&sheet)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("anonymous :: "));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    std::fs::write(&baseline_path, make_test_report(&[("cat", 100), ("fox", 77)])).unwrap();
    std::fs::write(&current_path, make_test_report(&[("cat", 40), ("fox", 100)])).unwrap();

    echograde()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 regressions, 1 improvements"))
        .stdout(predicate::str::contains("cat 100 -> 40 (-60)"))
        .stdout(predicate::str::contains("fox 77 -> 100 (+23)"));
}

#[test]
fn compare_fail_on_regression() {
    let dir = TempDir::new().unwrap();

    let baseline_path = dir.path().join("baseline.json");
    let current_path = dir.path().join("current.json");
    std::fs::write(&baseline_path, make_test_report(&[("cat", 100)])).unwrap();
    std::fs::write(&current_path, make_test_report(&[("cat", 0)])).unwrap();

    echograde()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&current_path)
        .args(["--fail-on-regression", "--format", "markdown"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("### Regressions"));
}

#[test]
fn compare_nonexistent_report() {
    echograde()
        .args(["compare", "--baseline", "no_such_file.json"])
        .args(["--current", "also_no_file.json"])
        .assert()
        .failure();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    echograde()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created echograde.toml"))
        .stdout(predicate::str::contains("Created exercises/example.toml"))
        .stdout(predicate::str::contains("Created answers/example.toml"));

    assert!(dir.path().join("echograde.toml").exists());
    assert!(dir.path().join("exercises/example.toml").exists());

    // The generated files work together.
    echograde()
        .current_dir(dir.path())
        .args(["grade", "--exercises", "exercises/example.toml"])
        .args(["--answers", "answers/example.toml", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example-student :: Example Exercises"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    echograde().current_dir(dir.path()).arg("init").assert().success();

    echograde()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    echograde()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading and dictation answer grader"));
}

#[test]
fn version_output() {
    echograde()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("echograde"));
}

/// Build a minimal grade report JSON with the given per-exercise scores.
fn make_test_report(scores: &[(&str, u8)]) -> String {
    let band = |score: u8| match score {
        90..=100 => "excellent",
        80..=89 => "very_good",
        70..=79 => "good",
        60..=69 => "satisfactory",
        _ => "needs_improvement",
    };

    let questions: Vec<Value> = scores
        .iter()
        .map(|(id, score)| {
            json!({
                "exercise_id": id,
                "kind": "dictation",
                "reference": "the cat sat",
                "response": "the cat sat",
                "result": {
                    "score": score,
                    "band": band(*score),
                    "passed": *score >= 70,
                    "exact_matches": 3,
                    "partial_matches": 0,
                    "reference_token_count": 3,
                    "candidate_token_count": 3
                }
            })
        })
        .collect();

    let overall =
        (scores.iter().map(|(_, s)| u32::from(*s)).sum::<u32>() as f64 / scores.len() as f64)
            .round() as u8;

    json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "created_at": "2025-01-01T00:00:00Z",
        "exercise_set": { "id": "unit-1", "name": "Unit 1", "exercise_count": scores.len() },
        "student": "kim",
        "questions": questions,
        "summary": {
            "question_count": scores.len(),
            "answered_count": scores.len(),
            "correct_count": scores.iter().filter(|(_, s)| *s >= 70).count(),
            "overall_score": overall,
            "accuracy": 50,
            "band": band(overall),
            "passed": overall >= 70,
            "band_counts": {},
            "per_kind": {}
        }
    })
    .to_string()
}
