//! End-to-end tests of the `quantcalc` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn quantcalc() -> Command {
    let mut cmd = Command::cargo_bin("quantcalc").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("QUANTCALC_CONFIG");
    cmd
}

fn json_output(args: &[&str]) -> Value {
    let output = quantcalc()
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn number(value: &Value, key: &str) -> f64 {
    value[key].as_f64().unwrap_or_else(|| panic!("missing {key} in {value}"))
}

const SCENARIO: [&str; 8] = [
    "--overnight",
    "0.015",
    "--bond",
    "1,3,2,101.25",
    "--bond",
    "1.5,2,2,99.95",
    "--bond",
    "3,5,2,110.3",
];

#[test]
fn option_premium_from_volatility() {
    let report = json_output(&[
        "option", "--spot", "100", "--strike", "100", "--maturity", "1", "--rate", "0.05",
        "--volatility", "0.2",
    ]);

    assert!((number(&report, "premium") - 10.450_583_572_185_565).abs() < 1e-9);
    assert_eq!(report["option_type"], "call");
    assert!((number(&report["greeks"], "delta") - 0.636_830_651_175_619).abs() < 1e-9);
}

#[test]
fn option_implied_volatility_round_trip() {
    let report = json_output(&[
        "option", "--spot", "100", "--strike", "100", "--maturity", "1", "--rate", "0.05",
        "--price", "8",
    ]);

    assert!((number(&report, "premium") - 8.0).abs() < 1e-6);
    let sigma = number(&report, "volatility");
    assert!(sigma > 0.1 && sigma < 0.2);
}

#[test]
fn option_rejects_arbitrage_price() {
    quantcalc()
        .args([
            "option", "--spot", "100", "--strike", "100", "--maturity", "1", "--rate", "0.05",
            "--price", "150",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price"));
}

#[test]
fn bond_yield_price_round_trip() {
    let priced = json_output(&["bond", "--maturity", "5", "--coupon", "4", "--yield", "3.5"]);
    let price = number(&priced, "price");

    let solved = json_output(&[
        "bond",
        "--maturity",
        "5",
        "--coupon",
        "4",
        "--price",
        &price.to_string(),
    ]);

    assert!((number(&solved, "yield") - 0.035).abs() < 1e-8);
    assert!(number(&solved, "duration") > 0.0);
    assert!(solved.get("bank_discount_yield").is_none());
}

#[test]
fn zero_coupon_bond_reports_money_market_yields() {
    let report = json_output(&["bond", "--maturity", "0.5", "--frequency", "1", "--price", "98"]);

    assert!((number(&report, "bank_discount_yield") - 0.02 * 360.0 / 182.5).abs() < 1e-9);
    assert!(report.get("money_market_yield").is_some());
}

#[test]
fn bond_requires_yield_or_price() {
    quantcalc()
        .args(["bond", "--maturity", "5"])
        .assert()
        .failure();
}

#[test]
fn bond_table_output() {
    quantcalc()
        .args(["bond", "--maturity", "2", "--coupon", "5", "--yield", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bond Analytics"))
        .stdout(predicate::str::contains("Duration"));
}

#[test]
fn bootstrap_scenario() {
    let report = json_output(&[&["bootstrap"][..], &SCENARIO[..]].concat());

    let points = report["curve"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(number(&points[0], "rate"), 0.015);
    assert_eq!(number(&points[6], "tenor"), 3.0);

    for row in report["repricing"].as_array().unwrap() {
        assert!((number(row, "market_price") - number(row, "curve_price")).abs() < 1e-6);
    }
}

#[test]
fn bootstrap_table_output() {
    quantcalc()
        .arg("bootstrap")
        .args(SCENARIO)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zero Curve"))
        .stdout(predicate::str::contains("Repricing"));
}

#[test]
fn bootstrap_from_csv() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "maturity,coupon,frequency,price").unwrap();
    writeln!(file, "1, 3, 2, 101.25").unwrap();
    writeln!(file, "1.5, 2, 2, 99.95").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let report = json_output(&["bootstrap", "--overnight", "0.015", "--file", &path]);

    assert_eq!(report["curve"]["points"].as_array().unwrap().len(), 4);
}

#[test]
fn bootstrap_rejects_mixed_frequencies() {
    quantcalc()
        .args([
            "bootstrap",
            "--overnight",
            "0.015",
            "--bond",
            "1,3,2,101.25",
            "--bond",
            "2,3,4,101",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Heterogeneous frequency"));
}

#[test]
fn bootstrap_rejects_malformed_quote() {
    quantcalc()
        .args(["bootstrap", "--overnight", "0.015", "--bond", "1,3,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 fields"));
}

#[test]
fn bootstrap_needs_bonds() {
    quantcalc()
        .args(["bootstrap", "--overnight", "0.015"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bond or --file"));
}

#[test]
fn config_defaults() {
    quantcalc()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[solver]"))
        .stdout(predicate::str::contains("method = \"newton\""));
}

#[test]
fn config_file_is_applied() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[solver]\nmethod = \"secant\"\nmax_iterations = 60").unwrap();

    let report = json_output(&["--config", file.path().to_str().unwrap(), "config"]);

    assert_eq!(report["solver"]["method"], "secant");
    assert_eq!(report["solver"]["max_iterations"], 60);
}

#[test]
fn invalid_config_file_fails() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[solver]\nmethod = \"brent\"").unwrap();

    quantcalc()
        .args(["--config", file.path().to_str().unwrap(), "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solver.method"));
}

#[test]
fn verbose_logs_to_stderr() {
    quantcalc()
        .args(["-v", "bootstrap"])
        .args(SCENARIO)
        .assert()
        .success()
        .stderr(predicate::str::contains("bootstrapped maturity"));
}
