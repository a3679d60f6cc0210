use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradebookd");
    let mut child = Command::new(exe)
        .env_remove("GRADEBOOKD_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradebookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn error_code(value: &serde_json::Value) -> &str {
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false), "{}", value);
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

fn seed(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) {
    let rows = [
        ("Charlie Brown", 903000003, "IE", [70.0, 70.0, 70.0, 70.0]),
        ("Alice Smith", 903000001, "CS", [80.0, 80.0, 80.0, 80.0]),
        ("Bob Jones", 903000002, "CE", [90.0, 90.0, 90.0, 90.0]),
    ];
    for (i, (name, gtid, major, grades)) in rows.iter().enumerate() {
        request_ok(
            stdin,
            reader,
            &format!("seed-{i}"),
            "students.add",
            json!({ "name": name, "gtid": gtid, "year": 2024, "major": major, "grades": grades }),
        );
    }
}

fn names(result: &serde_json::Value) -> Vec<String> {
    result
        .get("order")
        .and_then(|v| v.as_array())
        .expect("order array")
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

#[test]
fn empty_gradebook_rejects_sorts_rank_and_report() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    for (id, method) in [
        ("1", "sort.name"),
        ("2", "sort.averages"),
        ("3", "rank.topFive"),
        ("4", "report.print"),
        ("5", "course.recalculate"),
    ] {
        let value = request(&mut stdin, &mut reader, id, method, json!({}));
        assert_eq!(error_code(&value), "empty", "{}", method);
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn sorting_and_top_five() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed(&mut stdin, &mut reader);

    let by_avg = request_ok(&mut stdin, &mut reader, "1", "sort.averages", json!({}));
    assert_eq!(names(&by_avg), vec!["Bob Jones", "Alice Smith", "Charlie Brown"]);

    let by_name = request_ok(&mut stdin, &mut reader, "2", "sort.name", json!({}));
    assert_eq!(names(&by_name), vec!["Alice Smith", "Bob Jones", "Charlie Brown"]);
    let again = request_ok(&mut stdin, &mut reader, "3", "sort.name", json!({}));
    assert_eq!(names(&again), names(&by_name));

    let top = request_ok(&mut stdin, &mut reader, "4", "rank.topFive", json!({}));
    assert_eq!(
        top.get("gtids").cloned(),
        Some(json!([903000002, 903000001, 903000003, -1, -1]))
    );

    // Ranking leaves the store ordered by average.
    let listed = request_ok(&mut stdin, &mut reader, "5", "students.list", json!({}));
    let first = listed
        .pointer("/entries/0/student/name")
        .and_then(|v| v.as_str());
    assert_eq!(first, Some("Bob Jones"));

    let course = request_ok(&mut stdin, &mut reader, "6", "course.recalculate", json!({}));
    assert_eq!(course.get("courseAverage").and_then(|v| v.as_f64()), Some(80.0));

    let recalculated = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "grades.recalculate",
        json!({ "index": 2 }),
    );
    assert_eq!(recalculated.get("average").and_then(|v| v.as_f64()), Some(70.0));
    let bad_index = request(
        &mut stdin,
        &mut reader,
        "8",
        "grades.recalculate",
        json!({ "index": 9 }),
    );
    assert_eq!(error_code(&bad_index), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn report_text_is_byte_exact() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed(&mut stdin, &mut reader);
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "grades.update",
        json!({ "name": "Alice Smith", "assignment": 0, "grade": 92.5 }),
    );

    let report = request_ok(&mut stdin, &mut reader, "2", "report.print", json!({}));
    let text = report.get("text").and_then(|v| v.as_str()).expect("text");
    assert_eq!(
        text,
        "Charlie Brown,IE,70.00,70.00,70.00,70.00,70.00\n\
         Alice Smith,CS,92.50,80.00,80.00,80.00,83.13\n\
         Bob Jones,CE,90.00,90.00,90.00,90.00,90.00\n\
         \n\
         Overall Averages:\n\
         84.17,80.00,80.00,80.00,81.04\n"
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn weights_update_recomputes_averages() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "students.add",
        json!({ "name": "Ada", "gtid": 1, "year": 2024, "major": "CS", "grades": [100.0, 0.0, 0.0, 0.0] }),
    );
    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "setup.updateWeights",
        json!({ "weights": [0.5, 0.5, 0.0, 0.0] }),
    );
    assert_eq!(updated.get("courseAverage").and_then(|v| v.as_f64()), Some(50.0));

    let cfg = request_ok(&mut stdin, &mut reader, "3", "setup.get", json!({}));
    assert_eq!(
        cfg.pointer("/config/weights").cloned(),
        Some(json!([0.5, 0.5, 0.0, 0.0]))
    );

    let rejected = request(
        &mut stdin,
        &mut reader,
        "4",
        "setup.updateWeights",
        json!({ "weights": [0.5, 0.5, 0.5, 0.0] }),
    );
    assert_eq!(error_code(&rejected), "bad_params");

    drop(stdin);
    let _ = child.wait();
}
