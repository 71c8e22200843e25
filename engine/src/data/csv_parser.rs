use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Candle;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::EngineError;

const COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Accepts epoch seconds ("1700000000") or RFC 3339 ("2023-11-14T22:13:20Z").
pub fn parse_timestamp(s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(seconds) = s.parse::<i64>() {
        return Ok(seconds);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp())
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", s, e))
}

pub fn parse_price(s: &str) -> Result<f64> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|e| anyhow!("Failed to parse number '{}': {}", s, e))?;
    if !value.is_finite() {
        return Err(anyhow!("Non-finite number '{}'", s));
    }
    Ok(value)
}

pub struct OhlcvCsvParser;

impl OhlcvCsvParser {
    // CSV Header: timestamp,open,high,low,close,volume
    // Example Row: 1700000000,0.0012,0.0013,0.0011,0.00125,5321.7
    pub fn load_candles_from_csv(file_path: &Path) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        Self::read_candles(BufReader::new(file))
    }

    pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, EngineError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        for column in COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Missing '{}' column in CSV header",
                    column
                )));
            }
        }

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let candle = Self::parse_record(&record, &headers).map_err(|e| {
                EngineError::CsvDataFormatError(format!("line {}: {:#}", idx + 2, e))
            })?;
            candles.push(candle);
        }
        Ok(candles)
    }

    fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Candle> {
        Ok(Candle {
            timestamp: parse_timestamp(Self::require_field(record, headers, "timestamp")?)
                .context("Error parsing 'timestamp'")?,
            open: Self::price_field(record, headers, "open")?,
            high: Self::price_field(record, headers, "high")?,
            low: Self::price_field(record, headers, "low")?,
            close: Self::price_field(record, headers, "close")?,
            volume: Self::price_field(record, headers, "volume")?,
        })
    }

    fn price_field(record: &StringRecord, headers: &StringRecord, name: &str) -> Result<f64> {
        parse_price(Self::require_field(record, headers, name)?)
            .with_context(|| format!("Error parsing '{}'", name))
    }

    fn require_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
    ) -> Result<&'a str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| anyhow!("Missing '{}' field", name))
    }
}
