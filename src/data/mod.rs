//! Data module
//!
//! Durable trade history

mod recorder;

pub use recorder::{RecorderError, TradeRecord, TradeRecorder, TRADE_HEADER};
