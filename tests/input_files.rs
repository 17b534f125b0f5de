#![warn(clippy::pedantic)]

use std::path::PathBuf;
use std::process::Command;

use trusseq::{load_truss, render_forces, AnalysisError, DeterminacyError, JointId};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn two_bar_files_produce_the_expected_report() {
    let truss = load_truss(data("two_bar_joints.dat"), data("two_bar_beams.dat"))
        .expect("fixture files load");
    let solution = truss.evaluate().expect("determinate truss solves");
    assert_eq!(
        render_forces(&solution),
        concat!(
            " Beam       Force\n",
            "-----------------\n",
            "    1      -6.009\n",
            "    2      -6.009\n",
        )
    );
}

#[test]
fn bracket_files_load_supports_and_loads() {
    let truss = load_truss(data("bracket_joints.dat"), data("bracket_beams.dat"))
        .expect("fixture files load");
    assert_eq!(truss.support_count(), 2);
    let loaded = truss.joint(JointId(4)).expect("joint 4");
    assert!((loaded.load().y + 10.0).abs() < f64::EPSILON);
    assert!(truss.evaluate().is_ok());
}

#[test]
fn triangle_with_two_supports_is_over_determined() {
    let truss = load_truss(data("two_bar_joints.dat"), data("triangle_beams.dat"))
        .expect("fixture files load");
    assert_eq!(
        truss.evaluate(),
        Err(AnalysisError::Determinacy(DeterminacyError::Overdetermined {
            unknowns: 7,
            equations: 6
        }))
    );
}

#[test]
fn cli_prints_forces_and_reactions() {
    let output = Command::new(env!("CARGO_BIN_EXE_trusseq"))
        .env_remove("RUST_LOG")
        .arg(data("bracket_joints.dat"))
        .arg(data("bracket_beams.dat"))
        .arg("--reactions")
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("    2      14.142\n"));
    assert!(stdout.contains("    4       0.000\n"));
    assert!(stdout.contains("    2     -10.000      10.000\n"));
}

#[test]
fn cli_failures_exit_with_status_two_and_no_report() {
    for (joints, beams, message) in [
        ("two_bar_joints.dat", "triangle_beams.dat", "over-determined"),
        ("square_joints.dat", "square_beams.dat", "unstable truss"),
        ("missing_joints.dat", "two_bar_beams.dat", "cannot read"),
    ] {
        let output = Command::new(env!("CARGO_BIN_EXE_trusseq"))
            .env_remove("RUST_LOG")
            .arg(data(joints))
            .arg(data(beams))
            .output()
            .expect("binary runs");
        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
        assert!(stderr.starts_with("ERROR: "), "{stderr}");
        assert!(stderr.contains(message), "{stderr}");
    }
}
