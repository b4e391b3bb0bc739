//! End-to-end tests for the samcore binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const HEADER: &str = "@HD\tVN:1.6\tSO:coordinate
@SQ\tSN:chr1\tLN:248956422
@SQ\tSN:chr2\tLN:242193529
@RG\tID:rg1\tSM:NA12878\tFO:TACG
@PG\tID:bwa\tPN:bwa
";

fn samcore() -> Command {
    Command::cargo_bin("samcore").expect("binary exists")
}

#[test]
fn test_header_from_stdin() {
    samcore()
        .args(["header", "-"])
        .write_stdin(HEADER)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "@HD\tVN:1.6\tSO:coordinate\n@SQ\tSN:chr1\tLN:248956422\n@SQ\tSN:chr2\tLN:242193529\n",
        ))
        .stdout(predicate::str::contains("# read group rg1"))
        .stdout(predicate::str::contains("# program bwa"));
}

#[test]
fn test_header_json() {
    let output = samcore()
        .args(["--format", "json", "header", "-"])
        .write_stdin(HEADER)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["version"], "1.6");
    assert_eq!(json["sort_order"], "coordinate");
    assert_eq!(json["references"][1]["name"], "chr2");
    assert_eq!(json["references"][1]["id"], 1);
    assert_eq!(json["read_groups"][0]["flow_order"], "TACG");
}

#[test]
fn test_header_conflict_fails() {
    samcore()
        .args(["header", "-"])
        .write_stdin("@SQ\tSN:chr1\tLN:100\n@SQ\tSN:chr1\tLN:200\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate reference name"));
}

#[test]
fn test_header_from_sam_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".sam")
        .tempfile()
        .unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.flush().unwrap();

    samcore()
        .arg("header")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("@SQ\tSN:chr2\tLN:242193529"));
}

#[test]
fn test_header_missing_file() {
    samcore()
        .args(["header", "does-not-exist.bam"])
        .assert()
        .failure();
}

#[test]
fn test_cigar_valid() {
    samcore()
        .args(["cigar", "20M5B20M", "--start", "100", "--query-length", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reference_end\t135"))
        .stdout(predicate::str::contains("query_length\t40"))
        .stdout(predicate::str::contains("valid\ttrue"));
}

#[test]
fn test_cigar_invalid_exits_nonzero() {
    samcore()
        .args(["cigar", "3M10H10S", "--query-length", "13"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("valid\tfalse"))
        .stderr(predicate::str::contains("hard clip is not the outermost clip"));
}

#[test]
fn test_cigar_json() {
    let output = samcore()
        .args(["--format", "json", "cigar", "5S6M", "--start", "8"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reference_end"], 14);
    assert_eq!(json["query_length"], 11);
    assert_eq!(json["valid"], true);
    assert_eq!(json["operations"][0]["kind"], "soft_clip");
}

#[test]
fn test_cigar_parse_error() {
    samcore()
        .args(["cigar", "10Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid CIGAR operation"));
}
