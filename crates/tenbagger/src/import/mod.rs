mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::catalog;
use crate::scoring::{Dimension, Indicator, ParseDimensionError, MAX_SCORE};
use parser::IndicatorRecord;

#[derive(Debug)]
pub enum IndicatorImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingField {
        line: u64,
        column: &'static str,
    },
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    UnknownDimension {
        line: u64,
        source: ParseDimensionError,
    },
    UnresolvedDimension {
        line: u64,
        code: String,
    },
    MissingWeight {
        line: u64,
        code: String,
    },
}

impl std::fmt::Display for IndicatorImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorImportError::Io(err) => write!(f, "failed to read indicator file: {}", err),
            IndicatorImportError::Csv(err) => write!(f, "invalid indicator CSV data: {}", err),
            IndicatorImportError::MissingField { line, column } => {
                write!(f, "line {line}: column '{column}' is required")
            }
            IndicatorImportError::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {line}: '{value}' in column '{column}' is not a number"),
            IndicatorImportError::UnknownDimension { line, source } => {
                write!(f, "line {line}: {source}")
            }
            IndicatorImportError::UnresolvedDimension { line, code } => write!(
                f,
                "line {line}: indicator '{code}' is not catalogued and has no dimension"
            ),
            IndicatorImportError::MissingWeight { line, code } => write!(
                f,
                "line {line}: indicator '{code}' has no weight and no catalogued default"
            ),
        }
    }
}

impl std::error::Error for IndicatorImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndicatorImportError::Io(err) => Some(err),
            IndicatorImportError::Csv(err) => Some(err),
            IndicatorImportError::UnknownDimension { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IndicatorImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IndicatorImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Indicators grouped per stock, with stocks kept in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    stock_codes: Vec<String>,
    indicators: HashMap<String, Vec<Indicator>>,
}

impl IndicatorSet {
    pub fn stock_codes(&self) -> &[String] {
        &self.stock_codes
    }

    pub fn indicators(&self, stock_code: &str) -> Option<&[Indicator]> {
        self.indicators.get(stock_code).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.stock_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock_codes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, HashMap<String, Vec<Indicator>>) {
        (self.stock_codes, self.indicators)
    }

    fn push(&mut self, stock_code: String, indicator: Indicator) {
        match self.indicators.get_mut(&stock_code) {
            Some(existing) => existing.push(indicator),
            None => {
                self.stock_codes.push(stock_code.clone());
                self.indicators.insert(stock_code, vec![indicator]);
            }
        }
    }
}

pub struct IndicatorImporter;

impl IndicatorImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<IndicatorSet, IndicatorImportError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading indicator file");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<IndicatorSet, IndicatorImportError> {
        let mut set = IndicatorSet::default();
        let mut rows = 0usize;

        for record in parser::parse_records(reader)? {
            let stock_code = record.stock_code.clone();
            set.push(stock_code, build_indicator(record)?);
            rows += 1;
        }

        info!(rows, stocks = set.len(), "indicator file imported");
        Ok(set)
    }
}

fn build_indicator(record: IndicatorRecord) -> Result<Indicator, IndicatorImportError> {
    let definition = catalog::lookup(&record.indicator_code);

    let dimension = match (&record.dimension, definition) {
        (Some(raw), _) => raw
            .parse::<Dimension>()
            .map_err(|source| IndicatorImportError::UnknownDimension {
                line: record.line,
                source,
            })?,
        (None, Some(definition)) => definition.dimension,
        (None, None) => {
            return Err(IndicatorImportError::UnresolvedDimension {
                line: record.line,
                code: record.indicator_code,
            })
        }
    };

    let weight = record
        .weight
        .or_else(|| definition.and_then(|definition| definition.default_weight))
        .ok_or_else(|| IndicatorImportError::MissingWeight {
            line: record.line,
            code: record.indicator_code.clone(),
        })?;

    Ok(Indicator {
        code: record.indicator_code,
        name: definition.map(|definition| definition.name.to_string()),
        dimension,
        value: record.value,
        value_text: record.value_text,
        weight,
        score: None,
        max_score: MAX_SCORE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
stock_code,indicator_code,dimension,value,value_text,weight
600519,industry_lifecycle,,,growth,
600519,roe,competitiveness,28.5,,0.07
000001,IND004,, 12.0 ,,
600519,custom_signal,timing,3,,0.02
";

    #[test]
    fn groups_rows_by_stock_in_first_appearance_order() {
        let set = IndicatorImporter::from_reader(SAMPLE.as_bytes()).expect("import sample");

        assert_eq!(set.stock_codes(), ["600519".to_string(), "000001".to_string()]);
        assert_eq!(set.indicators("600519").map(<[Indicator]>::len), Some(3));
    }

    #[test]
    fn fills_dimension_and_weight_from_catalog() {
        let set = IndicatorImporter::from_reader(SAMPLE.as_bytes()).expect("import sample");

        let lifecycle = &set.indicators("600519").expect("moutai rows")[0];
        assert_eq!(lifecycle.dimension, Dimension::Industry);
        assert_eq!(lifecycle.weight, 0.15);
        assert_eq!(lifecycle.value_text.as_deref(), Some("growth"));
        assert_eq!(lifecycle.value, None);
        assert_eq!(lifecycle.name.as_deref(), Some("Industry lifecycle"));

        let share = &set.indicators("000001").expect("bank rows")[0];
        assert_eq!(share.dimension, Dimension::Competitiveness);
        assert_eq!(share.value, Some(12.0));
        assert_eq!(share.weight, 0.15);
    }

    #[test]
    fn explicit_columns_override_catalog() {
        let set = IndicatorImporter::from_reader(SAMPLE.as_bytes()).expect("import sample");

        let custom = &set.indicators("600519").expect("moutai rows")[2];
        assert_eq!(custom.code, "custom_signal");
        assert_eq!(custom.dimension, Dimension::Timing);
        assert_eq!(custom.weight, 0.02);
        assert_eq!(custom.name, None);
    }

    #[test]
    fn uncatalogued_code_without_dimension_is_rejected() {
        let csv = "stock_code,indicator_code,dimension,value,value_text,weight\n300750,mystery,,1,,0.1\n";

        match IndicatorImporter::from_reader(csv.as_bytes()) {
            Err(IndicatorImportError::UnresolvedDimension { line, code }) => {
                assert_eq!(line, 2);
                assert_eq!(code, "mystery");
            }
            other => panic!("expected unresolved dimension, got {other:?}"),
        }
    }

    #[test]
    fn bad_numbers_and_dimensions_are_reported() {
        let csv = "stock_code,indicator_code,dimension,value,value_text,weight\n300750,roe,,high,,\n";
        match IndicatorImporter::from_reader(csv.as_bytes()) {
            Err(IndicatorImportError::InvalidNumber { column, value, .. }) => {
                assert_eq!(column, "value");
                assert_eq!(value, "high");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }

        let csv = "stock_code,indicator_code,dimension,value,value_text,weight\n300750,roe,moat,1,,\n";
        match IndicatorImporter::from_reader(csv.as_bytes()) {
            Err(IndicatorImportError::UnknownDimension { source, .. }) => {
                assert_eq!(source.value, "moat")
            }
            other => panic!("expected unknown dimension, got {other:?}"),
        }
    }

    #[test]
    fn missing_weight_without_default_is_rejected() {
        let csv = "stock_code,indicator_code,dimension,value,value_text,weight\n300750,brand_value,,,strong,\n";

        match IndicatorImporter::from_reader(csv.as_bytes()) {
            Err(IndicatorImportError::MissingWeight { code, .. }) => assert_eq!(code, "brand_value"),
            other => panic!("expected missing weight, got {other:?}"),
        }
    }
}
