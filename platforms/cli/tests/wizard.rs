use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn run_wizard(answers: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tmwizard"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    for answer in answers {
        writeln!(stdin, "{}", answer).unwrap();
    }
    drop(stdin);

    child.wait_with_output().unwrap()
}

fn single_transition_answers(path: &Path) -> Vec<String> {
    [
        "3",
        "0",
        "1",
        "2",
        "a",
        "Add a transition.",
        "0",
        "1",
        "a",
        "a",
        "Right",
        "Finish.",
    ]
    .iter()
    .map(|s| s.to_string())
    .chain(std::iter::once(path.display().to_string()))
    .collect()
}

#[test]
fn test_writes_machine_and_confirms() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");
    let answers = single_transition_answers(&path);
    let answers: Vec<&str> = answers.iter().map(String::as_str).collect();

    let output = run_wizard(&answers);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("∂(0, a) = (1, a, R)"));
    assert!(stdout.contains(&format!(
        "Successfully wrote Turing Machine to {}.",
        path.display()
    )));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"start":"0","accept":"1","reject":"2","delta":[{"from":"0","to":[{"result":["1","a","R"],"on":"a"}]}]}"#
    );
}

#[test]
fn test_second_run_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");
    let answers = single_transition_answers(&path);
    let answers: Vec<&str> = answers.iter().map(String::as_str).collect();

    assert!(run_wizard(&answers).status.success());
    let first = fs::read_to_string(&path).unwrap();
    assert!(run_wizard(&answers).status.success());

    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}{}", first, first));
}

#[test]
fn test_closed_input_exits_with_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");

    let output = run_wizard(&["3", "0"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!path.exists());
}
