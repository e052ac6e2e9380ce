//! End-to-end edit flow: snapshot in, single edit, recalculated snapshot out.

use gridcalc_core::storage::{CsvValues, parse_json_content, write_json_content};
use gridcalc_core::{CellRef, DisplayValue, Format, Sheet};
use pretty_assertions::assert_eq;

#[test]
fn edit_updates_every_dependent_cell() {
    let mut sheet = Sheet::with_sample("Flow", 5, 5);
    sheet.set_cell_a1("D1", "=C1*2").unwrap();
    sheet.set_cell_a1("E1", "=D1-A1").unwrap();
    assert_eq!(sheet.display_rows()[0], vec!["5", "10", "15", "30", "25"]);

    sheet.set_cell(&CellRef::new(0, 1), "-10").unwrap();
    assert_eq!(sheet.display_rows()[0], vec!["5", "-10", "-5", "-10", "-15"]);
}

#[test]
fn snapshot_edit_snapshot() {
    let incoming = r#"[
        [{"value": "5", "displayValue": "5"}, {"value": "10", "displayValue": "10"}, {"value": "=A1+B1", "displayValue": 15}],
        [{"value": "", "displayValue": ""}, {"value": "", "displayValue": ""}, {"value": "", "displayValue": ""}]
    ]"#;
    let mut sheet = parse_json_content(incoming, Some("api")).unwrap();
    sheet.set_cell(&CellRef::new(1, 2), "=C1/A2").unwrap();

    let out = write_json_content(&sheet).unwrap();
    let reloaded = parse_json_content(&out, None).unwrap();
    let cell = reloaded.grid().get(&CellRef::new(1, 2)).unwrap();
    assert_eq!(cell.raw_value, "=C1/A2");
    assert_eq!(cell.display_value, DisplayValue::Error(gridcalc_engine::engine::ErrorCode::DivideByZero));

    let flat = reloaded.grid().to_flat();
    assert_eq!(flat.len(), 6);
    assert_eq!(flat[2].display_value, DisplayValue::Number(15.0));
}

#[test]
fn csv_render_after_edits() {
    let mut sheet = Sheet::new("csv", 2, 2);
    sheet
        .apply_edits([(CellRef::new(0, 0), "2"), (CellRef::new(0, 1), "=A1*A1"), (CellRef::new(1, 0), "=B1+B2"), (CellRef::new(1, 1), "=A2")])
        .unwrap();
    assert_eq!(
        sheet.render(Format::Csv, CsvValues::Display).unwrap(),
        "2,4\n#REF!,#REF!\n"
    );
    assert_eq!(
        sheet.render(Format::Csv, CsvValues::Raw).unwrap(),
        "2,=A1*A1\n=B1+B2,=A2\n"
    );
}
