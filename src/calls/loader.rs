//! Load call records from a dialer campaign CSV export

use super::CallRecord;
use crate::error::{AnalysisError, AnalysisResult};
use csv::{Reader, ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::path::Path;

/// Raw CSV row. Every column is read as text so that empty cells become
/// nulls instead of parse failures.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    call_result: Option<String>,
    #[serde(default)]
    retained: Option<String>,
    #[serde(default)]
    age: Option<String>,
    #[serde(default)]
    tenure: Option<String>,
    #[serde(default)]
    mortgage_balance: Option<String>,
    #[serde(default)]
    call_hour: Option<String>,
}

/// How missing required fields are treated while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Keep rows with empty `call_result`/`retained` as nulls
    #[default]
    Lenient,
    /// Reject the first row missing `call_result` or `retained`
    Strict,
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

/// Parse a retention flag. Accepts integer or float spellings of 0 and 1
/// since dataframe exports often write "1.0".
fn parse_retained(row: usize, raw: &str) -> AnalysisResult<u8> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AnalysisError::malformed(row, format!("retained is not numeric: {:?}", raw)))?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(AnalysisError::malformed(row, format!("retained must be 0 or 1, got {}", raw)))
    }
}

/// Parse a whole-number auxiliary column. Integral floats ("45.0") are
/// accepted since dataframes write nullable integer columns as floats.
fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    let value: f64 = raw.parse().ok()?;
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Auxiliary columns are not used by the aggregations, so in lenient mode an
/// unparseable cell becomes a null rather than failing the load.
fn parse_aux<T>(
    row: usize,
    column: &str,
    cell: Option<String>,
    mode: LoadMode,
    parse: fn(&str) -> Option<T>,
) -> AnalysisResult<Option<T>> {
    let Some(raw) = non_empty(cell) else {
        return Ok(None);
    };
    match parse(&raw) {
        Some(value) => Ok(Some(value)),
        None if mode == LoadMode::Strict => {
            Err(AnalysisError::malformed(row, format!("{} is not numeric: {:?}", column, raw)))
        }
        None => {
            warn!("Row {}: ignoring unparseable {} {:?}", row, column, raw);
            Ok(None)
        }
    }
}

impl CsvRow {
    fn to_record(self, row: usize, mode: LoadMode) -> AnalysisResult<CallRecord> {
        let call_result = non_empty(self.call_result);
        let retained = match non_empty(self.retained) {
            Some(raw) => Some(parse_retained(row, &raw)?),
            None => None,
        };

        if mode == LoadMode::Strict {
            if call_result.is_none() {
                return Err(AnalysisError::malformed(row, "missing call_result"));
            }
            if retained.is_none() {
                return Err(AnalysisError::malformed(row, "missing retained"));
            }
        }

        Ok(CallRecord {
            call_result,
            retained,
            age: parse_aux(row, "age", self.age, mode, parse_count)?,
            tenure: parse_aux(row, "tenure", self.tenure, mode, parse_count)?,
            mortgage_balance: parse_aux(row, "mortgage_balance", self.mortgage_balance, mode, parse_amount)?,
            call_hour: parse_aux(row, "call_hour", self.call_hour, mode, parse_count)?,
        })
    }
}

fn read_records<R: std::io::Read>(mut reader: Reader<R>, mode: LoadMode) -> AnalysisResult<Vec<CallRecord>> {
    let headers = reader.headers()?.clone();
    for required in ["call_result", "retained"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AnalysisError::malformed(0, format!("missing required column '{}'", required)));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let raw: CsvRow = result?;
        records.push(raw.to_record(row, mode)?);
    }

    debug!("Parsed {} call records ({:?} mode)", records.len(), mode);
    Ok(records)
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::Headers).flexible(false);
    builder
}

/// Load all call records from a CSV file
pub fn load_calls<P: AsRef<Path>>(path: P, mode: LoadMode) -> AnalysisResult<Vec<CallRecord>> {
    let path = path.as_ref();
    info!("Loading call records from {}", path.display());
    let reader = builder().from_path(path)?;
    read_records(reader, mode)
}

/// Load call records from any reader (e.g., string buffer, request body)
pub fn load_calls_from_reader<R: std::io::Read>(reader: R, mode: LoadMode) -> AnalysisResult<Vec<CallRecord>> {
    read_records(builder().from_reader(reader), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
call_result,retained,age,tenure,mortgage_balance,call_hour
answer,1,45,12,150000.5,9
no answer,0,61,3,98000,14
busy,1.0,33,,,
";

    #[test]
    fn test_load_from_reader() {
        let records = load_calls_from_reader(SAMPLE.as_bytes(), LoadMode::Lenient).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].label(), Some("answer"));
        assert_eq!(records[0].age, Some(45));
        assert_eq!(records[0].mortgage_balance, Some(150000.5));
        assert_eq!(records[1].label(), Some("no answer"));
        assert_eq!(records[2].retained, Some(1));
        assert_eq!(records[2].tenure, None);
        assert_eq!(records[2].call_hour, None);
    }

    #[test]
    fn test_minimal_columns() {
        let csv = "retained,call_result\n0,busy\n";
        let records = load_calls_from_reader(csv.as_bytes(), LoadMode::Strict).unwrap();
        assert_eq!(records, vec![CallRecord::new("busy", 0)]);
    }

    #[test]
    fn test_lenient_keeps_nulls() {
        let csv = "call_result,retained\n,1\nanswer,\n";
        let records = load_calls_from_reader(csv.as_bytes(), LoadMode::Lenient).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].call_result.is_none());
        assert_eq!(records[0].retained, Some(1));
        assert!(records[1].retained.is_none());
    }

    #[test]
    fn test_strict_reports_row() {
        let csv = "call_result,retained\nanswer,1\nbusy,\n";
        let err = load_calls_from_reader(csv.as_bytes(), LoadMode::Strict).unwrap_err();
        match err {
            AnalysisError::MalformedRecord { row, reason } => {
                assert_eq!(row, 1);
                assert!(reason.contains("retained"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_binary_retained_rejected() {
        let csv = "call_result,retained\nanswer,2\n";
        let err = load_calls_from_reader(csv.as_bytes(), LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedRecord { row: 0, .. }));
    }

    #[test]
    fn test_float_spelled_counts() {
        let csv = "call_result,retained,age,tenure,mortgage_balance,call_hour\nanswer,1,45.0,12.0,150000,9.0\n";
        for mode in [LoadMode::Lenient, LoadMode::Strict] {
            let records = load_calls_from_reader(csv.as_bytes(), mode).unwrap();
            assert_eq!(records[0].age, Some(45));
            assert_eq!(records[0].tenure, Some(12));
            assert_eq!(records[0].call_hour, Some(9));
            assert_eq!(records[0].mortgage_balance, Some(150000.0));
        }
    }

    #[test]
    fn test_bad_auxiliary_cell() {
        let csv = "call_result,retained,age,tenure\nanswer,1,forty,12.5\n";

        let records = load_calls_from_reader(csv.as_bytes(), LoadMode::Lenient).unwrap();
        assert_eq!(records[0].age, None);
        assert_eq!(records[0].tenure, None);
        assert_eq!(records[0].retained, Some(1));

        let err = load_calls_from_reader(csv.as_bytes(), LoadMode::Strict).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_reads_generated_export() {
        use crate::calls::{generate_sample, SampleParams};

        let sample = generate_sample(&SampleParams { rows: 50, ..SampleParams::default() });
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &sample {
            writer.serialize(record).unwrap();
        }
        let bytes = writer.into_inner().unwrap();

        let loaded = load_calls_from_reader(bytes.as_slice(), LoadMode::Strict).unwrap();
        assert_eq!(loaded.len(), 50);
        assert_eq!(loaded[0].call_result, sample[0].call_result);
        assert_eq!(loaded[0].age, sample[0].age);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "call_result,age\nanswer,40\n";
        let err = load_calls_from_reader(csv.as_bytes(), LoadMode::Lenient).unwrap_err();
        assert!(err.to_string().contains("retained"));
    }
}
