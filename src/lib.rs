//! order-bot: exchange-compliant order placement for the Binance USD-M
//! futures testnet
//!
//! This library provides the core components for:
//! - Order normalization against symbol filters (tick size, step size,
//!   minQty/maxQty, minNotional)
//! - Exchange metadata and signed order submission over REST
//! - The prepare/confirm/submit order flow
//! - CSV trade history
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod data;
pub mod exchange;
pub mod execution;
pub mod order;
pub mod telemetry;
