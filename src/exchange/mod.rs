//! Exchange module
//!
//! Boundary to the derivatives exchange: symbol metadata, reference prices
//! and order submission.

mod binance;
mod error;
mod types;

pub use binance::{BinanceConfig, BinanceFuturesClient};
pub use error::ExchangeError;
pub use types::{LotSize, OrderAck, SymbolRules};

use crate::order::NormalizedOrder;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Source of symbol filters and market prices
#[async_trait]
pub trait MarketMetadata: Send + Sync {
    /// Trading rules for a symbol
    async fn symbol_rules(&self, symbol: &str) -> Result<SymbolRules, ExchangeError>;
    /// Current price used to size MARKET orders
    async fn reference_price(&self, symbol: &str) -> Result<Decimal, ExchangeError>;
}

/// Sends normalized orders to the exchange
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order
    async fn submit_order(&self, order: &NormalizedOrder) -> Result<OrderAck, ExchangeError>;
}
