//! Order types

use super::{IntentDefect, Rejection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy the contract
    Buy,
    /// Sell the contract
    Sell,
}

impl Side {
    /// Wire representation used by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(Rejection::InvalidIntent(IntentDefect::UnknownSide(
                s.trim().to_string(),
            ))),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Market order (immediate execution)
    Market,
    /// Limit order (price specified, good till cancelled)
    Limit,
}

impl OrderType {
    /// Wire representation used by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            _ => Err(Rejection::InvalidIntent(IntentDefect::UnknownOrderType(
                s.trim().to_string(),
            ))),
        }
    }
}

/// The order a user asked for, before any exchange rules are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Symbol, e.g. "BTCUSDT"
    pub symbol: String,
    /// Trade side
    pub side: Side,
    /// Order type
    pub order_type: OrderType,
    /// Requested quantity
    pub quantity: Decimal,
    /// Limit price (LIMIT orders only)
    pub price: Option<Decimal>,
}

impl OrderIntent {
    /// Create a market order intent
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    /// Create a limit order intent
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }
}

/// Exchange constraints for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolFilters {
    /// Smallest allowed quantity
    pub min_qty: Decimal,
    /// Largest allowed quantity
    pub max_qty: Decimal,
    /// Quantity increment
    pub step_size: Decimal,
    /// Price increment
    pub tick_size: Decimal,
    /// Smallest allowed quantity x price
    pub min_notional: Decimal,
}

/// An order that satisfies every filter of its symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOrder {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// Multiple of the step size, within [minQty, maxQty]
    pub quantity: Decimal,
    /// Multiple of the tick size; present iff LIMIT
    pub price: Option<Decimal>,
}

impl NormalizedOrder {
    /// Turn the order back into an intent, e.g. to re-validate it
    pub fn to_intent(&self) -> OrderIntent {
        OrderIntent {
            symbol: self.symbol.clone(),
            side: self.side,
            order_type: self.order_type,
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// Notional value at the given price (the limit price for LIMIT orders)
    pub fn notional(&self, reference_price: Option<Decimal>) -> Option<Decimal> {
        self.price.or(reference_price).map(|p| p.saturating_mul(self.quantity))
    }
}

/// A change the normalizer made to the requested order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Limit price floored to the tick size
    PriceTicked {
        from: Decimal,
        to: Decimal,
        tick_size: Decimal,
    },
    /// Quantity floored to the step size
    QuantityStepped {
        from: Decimal,
        to: Decimal,
        step_size: Decimal,
    },
    /// Quantity raised to the smallest legal quantity
    RaisedToMinQty {
        from: Decimal,
        to: Decimal,
        min_qty: Decimal,
    },
    /// Quantity raised so that quantity x price reaches minNotional
    RaisedToMinNotional {
        from: Decimal,
        to: Decimal,
        min_notional: Decimal,
        price: Decimal,
    },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::PriceTicked {
                from,
                to,
                tick_size,
            } => write!(f, "price adjusted from {from} to {to} (tickSize {tick_size})"),
            Adjustment::QuantityStepped {
                from,
                to,
                step_size,
            } => write!(
                f,
                "quantity rounded down from {from} to {to} (stepSize {step_size})"
            ),
            Adjustment::RaisedToMinQty { from, to, min_qty } => {
                write!(f, "quantity {from} is below minQty {min_qty}, raised to {to}")
            }
            Adjustment::RaisedToMinNotional {
                from,
                to,
                min_notional,
                price,
            } => {
                match from.checked_mul(*price) {
                    Some(notional) => write!(f, "notional {notional} ")?,
                    None => write!(f, "notional ")?,
                }
                write!(
                    f,
                    "at price {price} is below minNotional {min_notional}, \
                     quantity raised from {from} to {to}"
                )
            }
        }
    }
}
