//! Trade recorder for accepted orders

use crate::exchange::OrderAck;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column names of the trade log
pub const TRADE_HEADER: [&str; 9] = [
    "Time", "Symbol", "Side", "Type", "Price", "Qty", "Notional", "OrderId", "Status",
];

/// Error writing the trade log
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the trade log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRecord {
    pub time: String,
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub price: Decimal,
    pub qty: Decimal,
    pub notional: Decimal,
    pub order_id: i64,
    pub status: String,
}

impl TradeRecord {
    /// Build a row from an exchange acknowledgement
    pub fn from_ack(ack: &OrderAck, time: DateTime<Local>) -> Self {
        Self {
            time: time.format("%Y-%m-%d %H:%M:%S").to_string(),
            symbol: ack.symbol.clone(),
            side: ack.side.to_string(),
            order_type: ack.order_type.to_string(),
            price: ack.display_price(),
            qty: ack.orig_qty,
            notional: ack.notional(),
            order_id: ack.order_id,
            status: ack.status.clone(),
        }
    }
}

/// Appends accepted orders to a CSV file
#[derive(Debug, Clone)]
pub struct TradeRecorder {
    path: PathBuf,
}

impl TradeRecorder {
    /// Create a recorder writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the trade log
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one acknowledged order, stamped with the current local time
    pub fn record(&self, ack: &OrderAck) -> Result<TradeRecord, RecorderError> {
        let record = TradeRecord::from_ack(ack, Local::now());
        self.append(&record)?;
        Ok(record)
    }

    /// Append a row, writing the header first if the file is new or empty
    pub fn append(&self, record: &TradeRecord) -> Result<(), RecorderError> {
        let io_err = |source| RecorderError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        let is_empty = file.metadata().map_err(io_err)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_empty {
            writer.write_record(TRADE_HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush().map_err(io_err)?;

        tracing::debug!(path = ?self.path, order_id = record.order_id, "Recorded trade");
        Ok(())
    }
}
