//! Execution types

use crate::exchange::{ExchangeError, SymbolRules};
use crate::order::{Adjustment, NormalizedOrder, OrderIntent, OrderType, Rejection};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Failure before anything reaches the order endpoint
#[derive(Error, Debug)]
pub enum PrepareError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("order rejected: {0}")]
    Rejected(#[from] Rejection),
}

/// A normalized order ready for confirmation and submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedOrder {
    /// What the user asked for
    pub intent: OrderIntent,
    /// Rules the order was normalized against
    pub rules: SymbolRules,
    /// Reference price used for MARKET orders
    pub reference_price: Option<Decimal>,
    /// Exchange-legal order
    pub order: NormalizedOrder,
    /// Changes made to the request, in application order
    pub adjustments: Vec<Adjustment>,
    /// Price used for the notional estimate
    pub effective_price: Decimal,
}

impl PreparedOrder {
    /// Approximate notional value (exact for LIMIT orders)
    pub fn notional(&self) -> Decimal {
        self.order.quantity.saturating_mul(self.effective_price)
    }

    /// Whether the submitted quantity differs from the requested one
    pub fn quantity_changed(&self) -> bool {
        self.order.quantity != self.intent.quantity
    }
}

impl fmt::Display for PreparedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = match (self.order.order_type, self.order.price) {
            (OrderType::Limit, Some(price)) => price.to_string(),
            _ => "market".to_string(),
        };
        writeln!(f, "Planned order:")?;
        writeln!(f, "  Symbol : {}", self.order.symbol)?;
        writeln!(f, "  Side   : {}", self.order.side)?;
        writeln!(f, "  Type   : {}", self.order.order_type)?;
        writeln!(f, "  Price  : {}", price)?;
        writeln!(f, "  Qty    : {}", self.order.quantity)?;
        write!(f, "  Notional (approx): {}", self.notional().normalize())
    }
}
