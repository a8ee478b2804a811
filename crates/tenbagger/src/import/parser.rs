use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::normalizer::{non_empty, normalize_cell};
use super::IndicatorImportError;

/// One CSV row with blanks resolved to `None` and numbers parsed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndicatorRecord {
    pub(crate) line: u64,
    pub(crate) stock_code: String,
    pub(crate) indicator_code: String,
    pub(crate) dimension: Option<String>,
    pub(crate) value: Option<f64>,
    pub(crate) value_text: Option<String>,
    pub(crate) weight: Option<f64>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<IndicatorRecord>, IndicatorImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(|header| normalize_cell(header).to_ascii_lowercase())
        .collect();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|position| position.line()).unwrap_or_default();
        let row: IndicatorRow = raw.deserialize(Some(&headers))?;

        let stock_code = non_empty(row.stock_code)
            .ok_or(IndicatorImportError::MissingField { line, column: "stock_code" })?;
        let indicator_code = non_empty(row.indicator_code)
            .ok_or(IndicatorImportError::MissingField { line, column: "indicator_code" })?;

        records.push(IndicatorRecord {
            line,
            stock_code,
            indicator_code,
            dimension: non_empty(row.dimension),
            value: parse_number(line, "value", row.value)?,
            value_text: non_empty(row.value_text),
            weight: parse_number(line, "weight", row.weight)?,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct IndicatorRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    stock_code: Option<String>,
    #[serde(default, alias = "code", deserialize_with = "empty_string_as_none")]
    indicator_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dimension: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value_text: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_number(
    line: u64,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<f64>, IndicatorImportError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| IndicatorImportError::InvalidNumber {
            line,
            column,
            value: raw,
        })
}
