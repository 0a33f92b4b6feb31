//! Filter normalization
//!
//! Turns an [`OrderIntent`] into a [`NormalizedOrder`] that passes the
//! exchange's PRICE_FILTER, LOT_SIZE and MIN_NOTIONAL checks. Prices and
//! quantities are floored to their grid; the only upward corrections are the
//! minQty floor and the minNotional floor, and neither is allowed to push the
//! quantity past maxQty.

use super::{
    Adjustment, FilterDefect, IntentDefect, MaxQtyCause, NormalizedOrder, OrderIntent, OrderType,
    Rejection, SymbolFilters,
};
use rust_decimal::Decimal;

/// A normalized order together with the changes made to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub order: NormalizedOrder,
    pub adjustments: Vec<Adjustment>,
    /// Price used for the notional check (limit price or reference price)
    pub effective_price: Decimal,
}

impl Normalization {
    /// Estimated notional value of the order, saturating at `Decimal::MAX`
    pub fn notional(&self) -> Decimal {
        self.order.quantity.saturating_mul(self.effective_price)
    }
}

/// Round `value` down to a multiple of `step`.
///
/// A non-positive step leaves the value untouched.
pub fn floor_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    let rem = value % step;
    if rem < Decimal::ZERO {
        value - rem - step
    } else {
        value - rem
    }
}

/// Round `value` up to a multiple of `step`.
///
/// A non-positive step leaves the value untouched. Saturates at
/// `Decimal::MAX` when the next multiple is not representable.
pub fn ceil_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    let rem = value % step;
    if rem > Decimal::ZERO {
        (value - rem).saturating_add(step)
    } else {
        value - rem
    }
}

/// Check that the filter set is usable
pub fn validate_filters(filters: &SymbolFilters) -> Result<(), Rejection> {
    let defect = if filters.step_size <= Decimal::ZERO {
        FilterDefect::NonPositiveStepSize(filters.step_size)
    } else if filters.tick_size <= Decimal::ZERO {
        FilterDefect::NonPositiveTickSize(filters.tick_size)
    } else if filters.min_qty > filters.max_qty {
        FilterDefect::MinQtyAboveMaxQty {
            min_qty: filters.min_qty,
            max_qty: filters.max_qty,
        }
    } else if filters.min_notional < Decimal::ZERO {
        FilterDefect::NegativeMinNotional(filters.min_notional)
    } else {
        return Ok(());
    };
    Err(Rejection::InvalidFilters(defect))
}

/// Normalize an order intent against a symbol's filters.
///
/// `reference_price` estimates the fill price of MARKET orders and is ignored
/// for LIMIT orders.
pub fn normalize(
    intent: &OrderIntent,
    filters: &SymbolFilters,
    reference_price: Option<Decimal>,
) -> Result<NormalizedOrder, Rejection> {
    normalize_explained(intent, filters, reference_price).map(|n| n.order)
}

/// Same as [`normalize`], also reporting every adjustment made
pub fn normalize_explained(
    intent: &OrderIntent,
    filters: &SymbolFilters,
    reference_price: Option<Decimal>,
) -> Result<Normalization, Rejection> {
    validate_filters(filters)?;

    if intent.quantity <= Decimal::ZERO {
        return Err(Rejection::InvalidIntent(IntentDefect::NonPositiveQuantity(
            intent.quantity,
        )));
    }

    let mut adjustments = Vec::new();

    let (price, effective_price) = match intent.order_type {
        OrderType::Limit => {
            let requested = intent
                .price
                .ok_or(Rejection::InvalidIntent(IntentDefect::MissingLimitPrice))?;
            if requested <= Decimal::ZERO {
                return Err(Rejection::InvalidIntent(IntentDefect::NonPositivePrice(
                    requested,
                )));
            }

            let rounded = floor_to_step(requested, filters.tick_size);
            if rounded <= Decimal::ZERO {
                return Err(Rejection::PriceTooSmall {
                    price: requested,
                    rounded,
                    tick_size: filters.tick_size,
                });
            }
            if rounded != requested {
                adjustments.push(Adjustment::PriceTicked {
                    from: requested,
                    to: rounded,
                    tick_size: filters.tick_size,
                });
            }
            (Some(rounded), rounded)
        }
        OrderType::Market => {
            let reference = reference_price
                .filter(|p| *p > Decimal::ZERO)
                .ok_or_else(|| Rejection::MissingReferencePrice {
                    symbol: intent.symbol.clone(),
                    price: reference_price,
                })?;
            (None, reference)
        }
    };

    let mut quantity = floor_to_step(intent.quantity, filters.step_size);
    if quantity != intent.quantity {
        adjustments.push(Adjustment::QuantityStepped {
            from: intent.quantity,
            to: quantity,
            step_size: filters.step_size,
        });
    }

    if quantity > filters.max_qty {
        return Err(Rejection::ExceedsMaxQty {
            required: quantity,
            max_qty: filters.max_qty,
            cause: MaxQtyCause::Requested,
        });
    }

    if quantity < filters.min_qty {
        let raised = ceil_to_step(filters.min_qty, filters.step_size);
        if raised > filters.max_qty {
            return Err(Rejection::ExceedsMaxQty {
                required: raised,
                max_qty: filters.max_qty,
                cause: MaxQtyCause::MinQty {
                    min_qty: filters.min_qty,
                },
            });
        }
        adjustments.push(Adjustment::RaisedToMinQty {
            from: quantity,
            to: raised,
            min_qty: filters.min_qty,
        });
        quantity = raised;
    }

    if below_min_notional(quantity, effective_price, filters.min_notional) {
        let needed = min_notional_quantity(filters, effective_price);
        if needed > filters.max_qty {
            return Err(Rejection::ExceedsMaxQty {
                required: needed,
                max_qty: filters.max_qty,
                cause: MaxQtyCause::MinNotional {
                    min_notional: filters.min_notional,
                    price: effective_price,
                },
            });
        }
        adjustments.push(Adjustment::RaisedToMinNotional {
            from: quantity,
            to: needed,
            min_notional: filters.min_notional,
            price: effective_price,
        });
        quantity = needed;
    }

    if quantity <= Decimal::ZERO {
        return Err(Rejection::QuantityTooSmall {
            requested: intent.quantity,
            rounded: quantity,
            step_size: filters.step_size,
        });
    }

    Ok(Normalization {
        order: NormalizedOrder {
            symbol: intent.symbol.clone(),
            side: intent.side,
            order_type: intent.order_type,
            quantity: quantity.normalize(),
            price: price.map(|p| p.normalize()),
        },
        adjustments,
        effective_price,
    })
}

/// Whether `quantity * price` falls short of `min_notional`.
///
/// A product too large to represent is above any minNotional.
fn below_min_notional(quantity: Decimal, price: Decimal, min_notional: Decimal) -> bool {
    quantity
        .checked_mul(price)
        .is_some_and(|notional| notional < min_notional)
}

/// Smallest step multiple whose notional at `price` reaches minNotional.
///
/// Saturates at `Decimal::MAX` when no representable quantity is enough.
fn min_notional_quantity(filters: &SymbolFilters, price: Decimal) -> Decimal {
    let Some(raw) = filters.min_notional.checked_div(price) else {
        return Decimal::MAX;
    };

    // Division can round the last digit down; one extra step covers it.
    let needed = ceil_to_step(raw, filters.step_size);
    if below_min_notional(needed, price, filters.min_notional) {
        needed.saturating_add(filters.step_size)
    } else {
        needed
    }
}
