// Integration tests for the `carex` shell contract: exit codes, --json
// stdout shape, and report artifacts.
//
// Run with: cargo test -p carex-cli --test cli_contract -- --nocapture

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

const BD_HEADER: &str = "Año;Mes;Nombre Cliente_factura;Nombre Centro de Operacion;Valor Total USD;\
Concepto;Moneda;Nombre Item;Vendedor;Desc Pais Cliente_factura";

/// A scratch directory with an empty settings file, so the user's own
/// report.toml never leaks into a test.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Legacy semicolon export pair: Ana sells 1000 of a 2000 June budget,
    /// Beto has an order (not an invoice) and a 500 budget.
    fn csv_pair(&self) -> (PathBuf, PathBuf) {
        let bd = self.write(
            "bd.csv",
            &format!(
                "{BD_HEADER}\n\
2024;6;Fyffes;Bogotá;1.000,00;FACTURA;USD;UCHUVA;Ana;Países Bajos\n\
2024;6;Rewe;Rionegro;700;PEDIDO;USD;GULUPA;Beto;Alemania\n\
2024;3;Rewe;Rionegro;250;FACTURA;EUR;GULUPA;Ana;Alemania\n"
            ),
        );
        let budget = self.write(
            "budget.csv",
            "Vendedor;Mes;Valor Total USD\nAna;6;2.000,00\nBeto;6;500\nAna;3;1.000\n",
        );
        (bd, budget)
    }

    fn carex(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_carex"));
        cmd.current_dir(self.dir.path());
        cmd.env_remove("CAREX_CONFIG");
        cmd.env_remove("RUST_LOG");
        cmd.arg("--config").arg(self.path("report.toml"));
        cmd
    }

    fn run_csv(&self, args: &[&str]) -> Output {
        let (bd, budget) = self.csv_pair();
        self.carex()
            .args(args)
            .arg("--input")
            .arg(&bd)
            .arg("--budget")
            .arg(&budget)
            .output()
            .expect("run carex")
    }
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(stdout: &str) -> serde_json::Value {
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed).unwrap_or_else(|e| {
        panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed)
    })
}

fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ===========================================================================
// carex report
// ===========================================================================

#[test]
fn report_json_is_one_document() {
    let fx = Fixture::new();
    let output = fx.run_csv(&["report", "--as-of", "2024-06", "--json", "--no-export"]);
    assert_exit(&output, 0);

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(val["load"]["transactions"], 3);
    assert_eq!(val["load"]["budget"], 3);
    assert_eq!(val["load"]["coerced_amounts"], 0);

    let dash = &val["dashboard"];
    assert_eq!(dash["overview"]["monthly"]["executed"], 1000.0);
    assert_eq!(dash["overview"]["monthly"]["budget"], 2500.0);
    assert_eq!(dash["overview"]["annual"]["executed"], 1250.0);
    assert_eq!(dash["overview"]["annual"]["budget"], 3500.0);

    let monthly = dash["salespeople"]["monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 3);
    assert_eq!(monthly[0]["key"], "Ana");
    assert_eq!(monthly[0]["execution_pct"], 50.0);
    assert_eq!(monthly[1]["key"], "Beto");
    assert_eq!(monthly[1]["executed"], 0.0);
    assert_eq!(monthly[2]["is_total"], true);
    assert_eq!(monthly[2]["budget"], 2500.0);
    assert_eq!(monthly[2]["execution_pct"], 40.0);
}

#[test]
fn report_writes_artifacts() {
    let fx = Fixture::new();
    let out = fx.path("salida");
    let output = fx.run_csv(&["report", "--as-of", "2024-06", "--out-dir", out.to_str().unwrap()]);
    assert_exit(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ejecución por vendedor - Junio 2024"), "{stdout}");
    assert!(stdout.contains("TOTAL COMPAÑÍA"));

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("reporte_vendedoras_") && n.ends_with(".xlsx")), "{names:?}");
    assert!(names.iter().any(|n| n.starts_with("dashboard_") && n.ends_with(".json")), "{names:?}");
}

#[test]
fn report_reads_a_workbook() {
    let fx = Fixture::new();
    let path = fx.path("ventas.xlsx");

    let mut workbook = Workbook::new();
    let bd = workbook.add_worksheet().set_name("BD").unwrap();
    for (col, header) in BD_HEADER.split(';').enumerate() {
        bd.write_string(0, col as u16, header).unwrap();
    }
    bd.write_number(1, 0, 2024).unwrap();
    bd.write_number(1, 1, 6).unwrap();
    for (col, value) in [(2, "Fyffes"), (3, "Bogotá")] {
        bd.write_string(1, col, value).unwrap();
    }
    bd.write_number(1, 4, 750.5).unwrap();
    for (col, value) in [(5, "FACTURA"), (6, "USD"), (7, "UCHUVA"), (8, "Ana"), (9, "Perú")] {
        bd.write_string(1, col, value).unwrap();
    }
    let budget = workbook.add_worksheet().set_name("Budget x Vendedor").unwrap();
    budget.write_string(0, 0, "Vendedor").unwrap();
    budget.write_string(0, 1, "Valor Total USD").unwrap();
    budget.write_string(1, 0, "Ana").unwrap();
    budget.write_number(1, 1, 1501).unwrap();
    workbook.save(&path).unwrap();

    let output = fx
        .carex()
        .args(["execution", "--period", "annual", "--as-of", "2024-06", "--json"])
        .arg("--input")
        .arg(&path)
        .output()
        .unwrap();
    assert_exit(&output, 0);

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    let rows = val.as_array().unwrap();
    assert_eq!(rows[0]["key"], "Ana");
    assert_eq!(rows[0]["executed"], 750.5);
    assert_eq!(rows[0]["execution_pct"], 50.0);
    assert!(rows[0]["period"].is_null());
}

// ===========================================================================
// carex execution / rank
// ===========================================================================

#[test]
fn execution_json_ends_with_total() {
    let fx = Fixture::new();
    let output = fx.run_csv(&["execution", "--period", "monthly", "--as-of", "2024-06", "--json"]);
    assert_exit(&output, 0);

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    let rows = val.as_array().unwrap();
    assert_eq!(rows.last().unwrap()["key"], "TOTAL COMPAÑÍA");
    assert_eq!(rows[0]["period"], 6);
}

#[test]
fn rank_by_country() {
    let fx = Fixture::new();
    let output = fx.run_csv(&["rank", "--dimension", "country", "--period", "annual", "--as-of", "2024-06", "--json"]);
    assert_exit(&output, 0);

    let val = assert_single_json(&String::from_utf8_lossy(&output.stdout));
    let rows = val.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["key"], "Países Bajos");
    assert_eq!(rows[0]["share_pct"], 80.0);
    assert_eq!(rows[1]["key"], "Alemania");
}

#[test]
fn rank_text_table() {
    let fx = Fixture::new();
    let output = fx.run_csv(&["rank", "--dimension", "operating-center", "--as-of", "2024-06"]);
    assert_exit(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sede"));
    assert!(stdout.contains("1.000,00"));
}

// ===========================================================================
// Exit codes
// ===========================================================================

#[test]
fn no_input_is_usage_error() {
    let fx = Fixture::new();
    let output = fx.carex().args(["report", "--no-export"]).output().unwrap();
    assert_exit(&output, 2);
    assert!(stderr(&output).contains("hint:"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let fx = Fixture::new();
    let output = fx.carex().args(["report", "--bogus"]).output().unwrap();
    assert_exit(&output, 2);
}

#[test]
fn unreadable_input_exits_3() {
    let fx = Fixture::new();
    let output = fx
        .carex()
        .args(["report", "--no-export", "--input"])
        .arg(fx.path("missing.xlsx"))
        .output()
        .unwrap();
    assert_exit(&output, 3);
}

#[test]
fn missing_column_exits_4() {
    let fx = Fixture::new();
    let bd = fx.write("bd.csv", "Año;Mes;Vendedor\n2024;6;Ana\n");
    let budget = fx.write("budget.csv", "Vendedor;Valor Total USD\nAna;10\n");
    let output = fx
        .carex()
        .args(["report", "--no-export", "--input"])
        .arg(&bd)
        .arg("--budget")
        .arg(&budget)
        .output()
        .unwrap();
    assert_exit(&output, 4);
    assert!(stderr(&output).contains("missing column 'Nombre Cliente_factura'"));
}

#[test]
fn bad_period_exits_5() {
    let fx = Fixture::new();
    let output = fx.run_csv(&["report", "--no-export", "--as-of", "2024-13"]);
    assert_exit(&output, 5);
}

#[test]
fn export_failure_exits_6() {
    let fx = Fixture::new();
    let blocker = fx.write("not-a-dir", "");
    let output = fx.run_csv(&["report", "--as-of", "2024-06", "--out-dir", blocker.to_str().unwrap()]);
    assert_exit(&output, 6);
}

// ===========================================================================
// carex config
// ===========================================================================

#[test]
fn config_check_accepts_valid_file() {
    let fx = Fixture::new();
    let path = fx.write("ok.toml", "[rules]\ntop_clients = 3\n");
    let output = fx.carex().args(["config", "check"]).arg(&path).output().unwrap();
    assert_exit(&output, 0);
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("ok:"));
}

#[test]
fn config_check_rejects_invalid_file() {
    let fx = Fixture::new();
    let path = fx.write("bad.toml", "[rules]\ntarget_pct = -5.0\n");
    let output = fx.carex().args(["config", "check"]).arg(&path).output().unwrap();
    assert_exit(&output, 5);
    assert!(stderr(&output).contains("target_pct"));
}

#[test]
fn config_show_prints_effective_toml() {
    let fx = Fixture::new();
    let output = fx.carex().args(["config", "show"]).output().unwrap();
    assert_exit(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: toml::Value = toml::from_str(&stdout).unwrap();
    assert_eq!(parsed["rules"]["total_label"].as_str(), Some("TOTAL COMPAÑÍA"));
    assert_eq!(parsed["input"]["layout"]["transactions_sheet"].as_str(), Some("BD"));
}
