//! Exchange data types

use crate::order::{OrderType, Side, SymbolFilters};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity constraints from a LOT_SIZE style filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSize {
    pub min_qty: Decimal,
    pub max_qty: Decimal,
    pub step_size: Decimal,
}

/// Everything the exchange publishes about trading one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRules {
    pub symbol: String,
    /// LOT_SIZE filter
    pub lot_size: LotSize,
    /// MARKET_LOT_SIZE filter, when the symbol has one
    pub market_lot_size: Option<LotSize>,
    pub tick_size: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_notional: Decimal,
}

impl SymbolRules {
    /// Filters that apply to an order of the given type.
    ///
    /// MARKET orders are checked against MARKET_LOT_SIZE when present.
    pub fn filters_for(&self, order_type: OrderType) -> SymbolFilters {
        let lot = match order_type {
            OrderType::Market => self.market_lot_size.unwrap_or(self.lot_size),
            OrderType::Limit => self.lot_size,
        };
        SymbolFilters {
            min_qty: lot.min_qty,
            max_qty: lot.max_qty,
            step_size: lot.step_size,
            tick_size: self.tick_size,
            min_notional: self.min_notional,
        }
    }
}

/// Exchange acknowledgement of a submitted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: String,
    pub symbol: String,
    pub status: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    #[serde(default)]
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub update_time: Option<i64>,
}

impl OrderAck {
    /// Order price, or the average fill price for orders without one
    pub fn display_price(&self) -> Decimal {
        if self.price.is_zero() {
            self.avg_price
        } else {
            self.price
        }
    }

    /// Price x original quantity
    pub fn notional(&self) -> Decimal {
        self.display_price().saturating_mul(self.orig_qty)
    }
}

/// `GET /fapi/v1/exchangeInfo` response (only the parts we read)
#[derive(Debug, Deserialize)]
pub(crate) struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub filters: Vec<RawFilter>,
}

/// One entry of a symbol's `filters` array
#[derive(Debug, Deserialize)]
#[serde(tag = "filterType")]
pub(crate) enum RawFilter {
    #[serde(rename = "PRICE_FILTER", rename_all = "camelCase")]
    Price {
        min_price: Decimal,
        max_price: Decimal,
        tick_size: Decimal,
    },
    #[serde(rename = "LOT_SIZE", rename_all = "camelCase")]
    LotSize {
        min_qty: Decimal,
        max_qty: Decimal,
        step_size: Decimal,
    },
    #[serde(rename = "MARKET_LOT_SIZE", rename_all = "camelCase")]
    MarketLotSize {
        min_qty: Decimal,
        max_qty: Decimal,
        step_size: Decimal,
    },
    #[serde(rename = "MIN_NOTIONAL")]
    MinNotional {
        #[serde(alias = "minNotional")]
        notional: Decimal,
    },
    #[serde(other)]
    Other,
}

/// `GET /fapi/v1/ticker/price` response
#[derive(Debug, Deserialize)]
pub(crate) struct TickerPrice {
    pub price: Decimal,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}
