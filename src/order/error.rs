//! Normalization rejections

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Why an order could not be turned into an exchange-legal request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid symbol filters: {0}")]
    InvalidFilters(FilterDefect),

    #[error("invalid order: {0}")]
    InvalidIntent(IntentDefect),

    #[error("limit price {price} rounds to {rounded} with tickSize {tick_size}")]
    PriceTooSmall {
        price: Decimal,
        rounded: Decimal,
        tick_size: Decimal,
    },

    #[error("quantity {requested} rounds to {rounded} with stepSize {step_size}")]
    QuantityTooSmall {
        requested: Decimal,
        rounded: Decimal,
        step_size: Decimal,
    },

    #[error("quantity {required}{cause} exceeds maxQty {max_qty}")]
    ExceedsMaxQty {
        required: Decimal,
        max_qty: Decimal,
        cause: MaxQtyCause,
    },

    #[error("{}", missing_reference_message(.symbol, .price))]
    MissingReferencePrice {
        symbol: String,
        /// The unusable price, if one was supplied
        price: Option<Decimal>,
    },
}

fn missing_reference_message(symbol: &str, price: &Option<Decimal>) -> String {
    match price {
        Some(price) => {
            format!("reference price {price} for MARKET order on {symbol} is not positive")
        }
        None => format!("no reference price available for MARKET order on {symbol}"),
    }
}

/// Which step of normalization pushed the quantity past maxQty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxQtyCause {
    /// The requested quantity itself
    Requested,
    /// Raising to minQty (rounded up to stepSize)
    MinQty { min_qty: Decimal },
    /// Raising until quantity x price reaches minNotional
    MinNotional {
        min_notional: Decimal,
        price: Decimal,
    },
}

impl fmt::Display for MaxQtyCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxQtyCause::Requested => Ok(()),
            MaxQtyCause::MinQty { min_qty } => write!(f, " required to reach minQty {min_qty}"),
            MaxQtyCause::MinNotional { min_notional, price } => write!(
                f,
                " required to reach minNotional {min_notional} at price {price}"
            ),
        }
    }
}

impl Rejection {
    /// Short machine-friendly name, used as a metric label
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::InvalidFilters(_) => "invalid_filters",
            Rejection::InvalidIntent(_) => "invalid_intent",
            Rejection::PriceTooSmall { .. } => "price_too_small",
            Rejection::QuantityTooSmall { .. } => "quantity_too_small",
            Rejection::ExceedsMaxQty { .. } => "exceeds_max_qty",
            Rejection::MissingReferencePrice { .. } => "missing_reference_price",
        }
    }
}

/// Inconsistent exchange metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterDefect {
    #[error("stepSize {0} must be positive")]
    NonPositiveStepSize(Decimal),

    #[error("tickSize {0} must be positive")]
    NonPositiveTickSize(Decimal),

    #[error("minQty {min_qty} is above maxQty {max_qty}")]
    MinQtyAboveMaxQty { min_qty: Decimal, max_qty: Decimal },

    #[error("minNotional {0} must not be negative")]
    NegativeMinNotional(Decimal),
}

/// Malformed user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentDefect {
    #[error("quantity {0} must be positive")]
    NonPositiveQuantity(Decimal),

    #[error("price is required for LIMIT orders")]
    MissingLimitPrice,

    #[error("price {0} must be positive")]
    NonPositivePrice(Decimal),

    #[error("unknown side '{0}', expected BUY or SELL")]
    UnknownSide(String),

    #[error("unknown order type '{0}', expected MARKET or LIMIT")]
    UnknownOrderType(String),
}
