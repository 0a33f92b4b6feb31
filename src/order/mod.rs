//! Order normalization module
//!
//! Pure translation of a requested order into exchange-legal parameters:
//! price floored to the tick size, quantity floored to the step size and
//! raised to the minQty / minNotional floors, bounded by maxQty.

mod error;
mod normalize;
mod types;

pub use error::{FilterDefect, IntentDefect, MaxQtyCause, Rejection};
pub use normalize::{
    ceil_to_step, floor_to_step, normalize, normalize_explained, validate_filters, Normalization,
};
pub use types::{Adjustment, NormalizedOrder, OrderIntent, OrderType, Side, SymbolFilters};
