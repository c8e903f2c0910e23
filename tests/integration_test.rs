use std::io::Write;

use assert_cmd::Command;
use predicates as pred;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn expenses_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", contents).unwrap();
    file
}

fn command() -> Command {
    let exe = env!("CARGO_BIN_EXE_settlement_engine");
    Command::new(exe)
}

#[test]
fn end_to_end_outputs_expected_settlement() {
    // Several rows per participant add up to
    // A 1100, B 1100, C 250, D 71, E 103, F 240.
    let file = expenses_file(
        "participant, amount\n\
    A, 1000\n\
    A, 100\n\
    B, 1100\n\
    C, 250\n\
    D, 71\n\
    E, 100.50\n\
    E, 2.50\n\
    F, 240\n",
    );

    let mut cmd = command();
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(pred::str::contains(
            "After all transfers, everyone will have spent $477.33",
        ))
        .stdout(pred::str::contains("D transfers $406.33 to A"))
        .stdout(pred::str::contains("E transfers $374.33 to B"))
        .stdout(pred::str::contains("EXCESS").not());
}

#[test]
fn balanced_group_prints_no_transfers() {
    let file = expenses_file("participant,amount\nA,100\nB,100\nC,100\n");

    let mut cmd = command();
    cmd.arg(file.path()).args(["--scale", "0"]);

    cmd.assert()
        .success()
        .stdout(pred::str::contains("everyone will have spent $100"))
        .stdout(pred::str::contains("transfers $").not());
}

#[test]
fn two_participants_settle_with_one_transfer() {
    let file = expenses_file("participant,amount\nA,0\nB,200\n");

    let mut cmd = command();
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(pred::str::contains("A transfers $100 to B"));
}

#[test]
fn malformed_row_fails_without_output() {
    let file = expenses_file("participant,amount\nA,100\nB,lots\n");

    let mut cmd = command();
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .stdout(pred::str::is_empty())
        .stderr(pred::str::contains("CSV deserialization error"));
}

#[test]
fn reserved_participant_is_rejected() {
    let file = expenses_file("participant,amount\nA,100\nEXCESS,5\n");

    let mut cmd = command();
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .stderr(pred::str::contains("reserved"));
}

#[test]
fn missing_argument_fails() {
    command()
        .assert()
        .failure()
        .stderr(pred::str::contains("No input file argument was provided"));
}
