//! Series readers for economic indicator data
//!
//! Statistic-office exports arrive as two-column CSV files: a date label
//! and a value. Labels are either plain years (`2020`), abbreviated years
//! (`'20`), or quarters (`Q1 '20`). Quarterly values are summed into
//! yearly totals. The debt history file is a wide CSV keyed by a date
//! column, collapsed to the last observation within each year.
//!
//! Readers fail with typed errors rather than returning partial data.

use crate::error::{FiscalError, Result};
use crate::panel::{DEBT, YEAR};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// A single yearly observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    /// Calendar year
    pub year: i64,
    /// Observed value
    pub value: f64,
}

impl From<(i64, f64)> for YearValue {
    fn from((year, value): (i64, f64)) -> Self {
        Self { year, value }
    }
}

/// Granularity of the date labels in a series file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateGranularity {
    /// One value per year
    Year,
    /// Four values per year, summed into a yearly total
    Quarter,
}

/// Build a two-column `[year, value]` frame from in-memory pairs.
///
/// Input years need not be sorted or contiguous; they must be unique.
pub fn series_from_pairs(value_name: &str, pairs: &[(i64, f64)]) -> Result<DataFrame> {
    let observations: Vec<YearValue> = pairs.iter().map(|&pair| YearValue::from(pair)).collect();
    let years: Vec<i64> = observations.iter().map(|obs| obs.year).collect();
    let values: Vec<f64> = observations.iter().map(|obs| obs.value).collect();

    let df = DataFrame::new(vec![
        Series::new(YEAR, years),
        Series::new(value_name, values),
    ])?;
    Ok(df)
}

/// Read a two-column series CSV into a `[year, value_name]` frame.
///
/// The first column holds date labels, the second the raw values, which
/// are scaled by `multiplier`. Rows whose label carries a `*` footnote
/// marker are dropped. With [`DateGranularity::Quarter`], values are
/// summed per year.
pub fn read_series_csv<P: AsRef<Path>>(
    path: P,
    granularity: DateGranularity,
    multiplier: f64,
    value_name: &str,
) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    if file.metadata()?.len() == 0 {
        return Err(FiscalError::Data(format!(
            "file '{}' is empty",
            path.as_ref().display()
        )));
    }

    let df = CsvReader::new(file)
        .infer_schema(None)
        .has_header(true)
        .finish()?;

    if df.width() < 2 {
        return Err(FiscalError::Data(format!(
            "file '{}' must have a date column and a value column",
            path.as_ref().display()
        )));
    }

    let columns = df.get_columns();
    let labels = &columns[0];
    let raw_values = columns[1].cast(&DataType::Float64)?;
    let values = raw_values.f64()?;

    // Parse every date label up front; dropped rows stay `None`.
    let parsed_rows: Vec<Option<(i64, u8)>> = match labels.dtype() {
        DataType::Int64 | DataType::Int32 => {
            let years = labels.cast(&DataType::Int64)?;
            years
                .i64()?
                .into_iter()
                .map(|year| year.map(|year| (year, 1)))
                .collect()
        }
        DataType::Utf8 => {
            let mut rows = Vec::with_capacity(df.height());
            for label in labels.utf8()?.into_iter() {
                rows.push(match label {
                    // Footnoted and blank labels are dropped, matching
                    // the source spreadsheets.
                    None => None,
                    Some(label) if label.contains('*') || label.trim().is_empty() => None,
                    Some(label) => Some(parse_date_label(label, granularity)?),
                });
            }
            rows
        }
        other => {
            return Err(FiscalError::Data(format!(
                "unsupported date column type '{}' in '{}'",
                other,
                path.as_ref().display()
            )))
        }
    };

    let mut by_year: BTreeMap<i64, f64> = BTreeMap::new();

    for (row, parsed) in parsed_rows.into_iter().enumerate() {
        let (year, _quarter) = match parsed {
            Some(parsed) => parsed,
            None => continue,
        };

        let value = values.get(row).ok_or_else(|| {
            FiscalError::Data(format!(
                "missing value for year {} in '{}'",
                year,
                path.as_ref().display()
            ))
        })?;

        let scaled = value * multiplier;
        match granularity {
            DateGranularity::Year => {
                by_year.insert(year, scaled);
            }
            DateGranularity::Quarter => {
                *by_year.entry(year).or_insert(0.0) += scaled;
            }
        }
    }

    let years: Vec<i64> = by_year.keys().copied().collect();
    let totals: Vec<f64> = by_year.values().copied().collect();

    let df = DataFrame::new(vec![
        Series::new(YEAR, years),
        Series::new(value_name, totals),
    ])?;
    Ok(df)
}

/// Read a debt history CSV keyed by `date_column` into a `[year, debt]`
/// frame, taking `value_column` as the debt amount.
///
/// Multiple records within one year collapse to the last observation of
/// that year (latest date wins), so downstream integration sees at most
/// one value per year.
pub fn read_debt_csv<P: AsRef<Path>>(
    path: P,
    date_column: &str,
    value_column: &str,
) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    if file.metadata()?.len() == 0 {
        return Err(FiscalError::Data(format!(
            "file '{}' is empty",
            path.as_ref().display()
        )));
    }

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let date_index = headers
        .iter()
        .position(|name| name == date_column)
        .ok_or_else(|| {
            FiscalError::Data(format!(
                "date column '{}' is not in '{}'",
                date_column,
                path.as_ref().display()
            ))
        })?;
    let value_index = headers
        .iter()
        .position(|name| name == value_column)
        .ok_or_else(|| {
            FiscalError::Data(format!(
                "value column '{}' is not in '{}'",
                value_column,
                path.as_ref().display()
            ))
        })?;

    let mut last_of_year: BTreeMap<i64, (NaiveDate, f64)> = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        let date_label = record.get(date_index).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_label, "%Y-%m-%d").map_err(|_| {
            FiscalError::Data(format!("unparsable date '{}' in '{}'", date_label, date_column))
        })?;

        let value_label = record.get(value_index).unwrap_or("");
        let value: f64 = value_label.parse().map_err(|_| {
            FiscalError::Data(format!(
                "unparsable debt amount '{}' for {}",
                value_label, date
            ))
        })?;

        let year = i64::from(date.year());
        match last_of_year.get(&year) {
            Some((seen, _)) if *seen > date => {}
            _ => {
                last_of_year.insert(year, (date, value));
            }
        }
    }

    let years: Vec<i64> = last_of_year.keys().copied().collect();
    let values: Vec<f64> = last_of_year.values().map(|(_, value)| *value).collect();

    let df = DataFrame::new(vec![Series::new(YEAR, years), Series::new(DEBT, values)])?;
    Ok(df)
}

/// Parse a date label into `(year, quarter)`.
///
/// Year labels: `2020` or `'20` (two-digit years are 2000-based, as in
/// the source exports). Quarter labels: `Q1 '20`.
fn parse_date_label(label: &str, granularity: DateGranularity) -> Result<(i64, u8)> {
    match granularity {
        DateGranularity::Year => Ok((parse_year_label(label.trim())?, 1)),
        DateGranularity::Quarter => {
            let mut parts = label.trim().split_whitespace();
            let quarter_part = parts.next().unwrap_or("");
            let year_part = parts.next().unwrap_or("");

            let quarter: u8 = quarter_part
                .strip_prefix('Q')
                .and_then(|q| q.parse().ok())
                .filter(|q| (1..=4).contains(q))
                .ok_or_else(|| {
                    FiscalError::Data(format!("unparsable quarter label '{}'", label))
                })?;

            Ok((parse_year_label(year_part)?, quarter))
        }
    }
}

fn parse_year_label(label: &str) -> Result<i64> {
    if let Some(short) = label.strip_prefix('\'') {
        let two_digit: i64 = short
            .parse()
            .map_err(|_| FiscalError::Data(format!("unparsable year label '{}'", label)))?;
        return Ok(2000 + two_digit);
    }

    label
        .parse()
        .map_err(|_| FiscalError::Data(format!("unparsable year label '{}'", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_year_labels() {
        assert_eq!(parse_year_label("2020").unwrap(), 2020);
    }

    #[test]
    fn parses_abbreviated_year_labels() {
        assert_eq!(parse_year_label("'20").unwrap(), 2020);
        assert_eq!(parse_year_label("'05").unwrap(), 2005);
    }

    #[test]
    fn parses_quarter_labels() {
        let (year, quarter) = parse_date_label("Q3 '21", DateGranularity::Quarter).unwrap();
        assert_eq!(year, 2021);
        assert_eq!(quarter, 3);
    }

    #[test]
    fn rejects_malformed_quarter_labels() {
        assert!(parse_date_label("Q5 '21", DateGranularity::Quarter).is_err());
        assert!(parse_date_label("2021", DateGranularity::Quarter).is_err());
    }
}
