use std::path::Path;
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

use outletkpi_cli::{Config, ReportFormat, run};
use outletkpi_core::columns::MONTHLY_COLUMNS;
use outletkpi_inventory::JoinStrategy;

/// (code, description, stock-sold, floor price, outlet price)
type InventoryFixture = (&'static str, &'static str, f64, f64, f64);
/// (code, description, units in stock); every month sells 1..=9 units.
type OutletFixture = (&'static str, &'static str, f64);

fn write_workbook(path: &Path, inventory: &[InventoryFixture], outlet: &[OutletFixture]) {
    write_sheets(path, inventory, Some(outlet));
}

fn write_sheets(path: &Path, inventory: &[InventoryFixture], outlet: Option<&[OutletFixture]>) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Inventario").unwrap();
    for (c, h) in ["Codigo", "Descripcion", "Stock", "Precio Sala", "Outlet"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    for (r, (code, desc, units, floor, outlet_price)) in inventory.iter().enumerate() {
        let r = (r + 1) as u32;
        sheet.write_string(r, 0, *code).unwrap();
        sheet.write_string(r, 1, *desc).unwrap();
        sheet.write_number(r, 2, *units).unwrap();
        sheet.write_number(r, 3, *floor).unwrap();
        sheet.write_number(r, 4, *outlet_price).unwrap();
    }

    let Some(outlet) = outlet else {
        workbook.save(path).unwrap();
        return;
    };

    let sheet = workbook.add_worksheet();
    sheet.set_name("Outlet").unwrap();
    let mut headers = vec!["Número de artículo", "Descripción del artículo"];
    headers.extend(MONTHLY_COLUMNS);
    headers.push("Stock al 1 de oct");
    for (c, h) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    for (r, (code, desc, stock)) in outlet.iter().enumerate() {
        let r = (r + 1) as u32;
        sheet.write_string(r, 0, *code).unwrap();
        sheet.write_string(r, 1, *desc).unwrap();
        for m in 0..9u16 {
            sheet.write_number(r, 2 + m, (m + 1) as f64).unwrap();
        }
        sheet.write_number(r, 11, *stock).unwrap();
    }

    workbook.save(path).unwrap();
}

fn run_to_string(config: &Config) -> String {
    let mut out = Vec::new();
    run(config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn text_report_for_a_small_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.xlsx");
    write_workbook(
        &path,
        &[
            ("1001", "Sofa", 10.0, 100.0, 80.0),
            ("1002", "Lampara", 0.0, 50.0, 40.0),
        ],
        &[("1001", "Sofa", 10.0), ("1002", "Lampara", 5.0)],
    );

    let text = run_to_string(&Config::new(&path));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "Total Sales (Outlet Price): $800.00");
    assert_eq!(lines[1], "Total Sales (Floor Price): $1,000.00");
    assert_eq!(lines[2], "Total Units Sold: 90");
    // ASP: (80 + 0) / 2
    assert_eq!(lines[3], "Average Selling Price: $40.00");
    assert_eq!(lines[4], "Average Discount: 20.0%");
    // Sell-through: (50 + 0) / 2
    assert_eq!(lines[6], "Average Sell-Through Rate: 25.0%");
    assert_eq!(lines[9], "Best Selling Product: Sofa (10 units)");
    assert_eq!(lines[10], "Least Selling Product: Lampara (0 units)");
    assert_eq!(lines[11], "Unsold Items: Lampara");
}

#[test]
fn key_join_and_positional_join_differ_on_shuffled_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffled.xlsx");
    write_workbook(
        &path,
        &[
            ("1001", "Sofa", 10.0, 100.0, 80.0),
            ("1002", "Mesa", 10.0, 100.0, 80.0),
        ],
        &[("1002", "Mesa", 30.0), ("1001", "Sofa", 10.0)],
    );

    let mut config = Config::new(&path);
    let keyed = run(&config, &mut Vec::<u8>::new()).unwrap();
    assert!((keyed.inventory[0].sell_through_rate - 50.0).abs() < 1e-9);
    assert!((keyed.inventory[1].sell_through_rate - 25.0).abs() < 1e-9);

    config.join = JoinStrategy::Positional;
    let positional = run(&config, &mut Vec::<u8>::new()).unwrap();
    assert!((positional.inventory[0].sell_through_rate - 25.0).abs() < 1e-9);
    assert!((positional.inventory[1].sell_through_rate - 50.0).abs() < 1e-9);
}

#[test]
fn json_report_and_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.xlsx");
    write_workbook(
        &path,
        &[("1001", "Sofa", 10.0, 100.0, 80.0), ("9999", "Huerfano", 1.0, 10.0, 5.0)],
        &[("1001", "Sofa", 10.0)],
    );

    let mut config = Config::new(&path);
    config.format = ReportFormat::Json;
    config.export_dir = Some(dir.path().join("export"));

    let json = run_to_string(&config);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["total_sales_outlet"], 805.0);
    assert_eq!(value["join"]["matched"], 1);
    assert_eq!(value["join"]["unmatched_inventory"][0]["item_number"], "9999");
    assert!(value["generated_at"].is_string());

    assert!(dir.path().join("export/inventory_data.csv").exists());
    assert!(dir.path().join("export/outlet_data.csv").exists());
}

#[test]
fn missing_workbook_fails_with_path_in_message() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().join("missing.xlsx"));

    let err = run(&config, &mut Vec::<u8>::new()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.xlsx"));
}

fn outletkpi(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_outletkpi"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("OUTLETKPI_JOIN")
        .env_remove("OUTLETKPI_FORMAT")
        .env_remove("OUTLETKPI_EXPORT_DIR")
        .env_remove("OUTLETKPI_COVERAGE_DAYS")
        .env_remove("OUTLETKPI_LOG_FORMAT")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn binary_prints_report_on_stdout_and_logs_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.xlsx");
    write_workbook(&path, &[("1001", "Sofa", 10.0, 100.0, 80.0)], &[("1001", "Sofa", 10.0)]);

    let output = outletkpi(&[path.to_str().unwrap()]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert!(output.status.success(), "stderr: {stderr}");
    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.starts_with("Total Sales (Outlet Price): $800.00\n"));
    assert!(stderr.contains("loaded workbook"));
    assert!(!stdout.contains("loaded workbook"));
}

#[test]
fn binary_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");

    let output = outletkpi(&[path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr).unwrap().contains("missing.xlsx"));
}

#[test]
fn binary_fails_when_outlet_sheet_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solo_inventario.xlsx");
    write_sheets(&path, &[("1001", "Sofa", 10.0, 100.0, 80.0)], None);

    let output = outletkpi(&[path.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing required sheets: Outlet"), "stderr: {stderr}");
}

#[test]
fn binary_rejects_invalid_coverage_window() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.xlsx");
    write_workbook(&path, &[("1001", "Sofa", 10.0, 100.0, 80.0)], &[("1001", "Sofa", 10.0)]);

    let output = outletkpi(&[path.to_str().unwrap(), "--coverage-days", "0"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
