use tenbagger::import::{IndicatorImportError, IndicatorImporter};
use tenbagger::scoring::Dimension;

#[test]
fn importer_reads_fixture_with_catalog_defaults() {
    let data = include_bytes!("fixtures/indicators.csv");

    let set = IndicatorImporter::from_reader(&data[..]).expect("fixture imports");

    assert_eq!(set.len(), 4);
    let moutai = set.indicators("600519").expect("moutai present");
    assert_eq!(moutai.len(), 7);
    let share = moutai
        .iter()
        .find(|indicator| indicator.code == "market_share")
        .expect("market share row");
    assert_eq!(share.dimension, Dimension::Competitiveness);
    assert_eq!(share.weight, 0.15);
    assert_eq!(share.value_text.as_deref(), Some("high"));
    assert!(moutai.iter().all(|indicator| indicator.score.is_none()));
}

#[test]
fn importer_keeps_out_of_range_weights_for_the_scorer_to_reject() {
    let data = include_bytes!("fixtures/indicators.csv");

    let set = IndicatorImporter::from_reader(&data[..]).expect("fixture imports");

    let corrupt = set.indicators("688981").expect("corrupt stock present");
    assert_eq!(corrupt[0].weight, -0.5);
}

#[test]
fn importer_accepts_code_header_alias_and_byte_order_mark() {
    let csv = "\u{feff}stock_code,code,value\n600036,roe,17.5\n";

    let set = IndicatorImporter::from_reader(csv.as_bytes()).expect("aliased header imports");

    let rows = set.indicators("600036").expect("bank present");
    assert_eq!(rows[0].code, "roe");
    assert_eq!(rows[0].value, Some(17.5));
    assert_eq!(rows[0].weight, 0.07);
}

#[test]
fn missing_file_surfaces_io_error() {
    match IndicatorImporter::from_path("fixtures/not-here.csv") {
        Err(IndicatorImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn rows_without_stock_code_are_rejected() {
    let csv = "stock_code,indicator_code,value\n ,roe,3\n";

    match IndicatorImporter::from_reader(csv.as_bytes()) {
        Err(IndicatorImportError::MissingField { line, column }) => {
            assert_eq!(line, 2);
            assert_eq!(column, "stock_code");
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}
