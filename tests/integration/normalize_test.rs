//! Integration tests for order normalization

use order_bot::order::{normalize, MaxQtyCause, OrderIntent, Rejection, Side, SymbolFilters};
use rust_decimal_macros::dec;

fn filters(min_notional: rust_decimal::Decimal) -> SymbolFilters {
    SymbolFilters {
        min_qty: dec!(0.001),
        max_qty: dec!(1000),
        step_size: dec!(0.001),
        tick_size: dec!(0.01),
        min_notional,
    }
}

#[test]
fn test_tiny_market_order_raised_to_one_step() {
    let intent = OrderIntent::market("BTCUSDT", Side::Buy, dec!(0.00007));

    let order = normalize(&intent, &filters(dec!(5)), Some(dec!(50000))).unwrap();
    assert_eq!(order.quantity, dec!(0.001));
    assert!(order.price.is_none());
}

#[test]
fn test_quantity_raised_for_min_notional() {
    let intent = OrderIntent::market("BTCUSDT", Side::Buy, dec!(0.001));

    let order = normalize(&intent, &filters(dec!(100)), Some(dec!(50000))).unwrap();
    assert_eq!(order.quantity, dec!(0.002));
}

#[test]
fn test_limit_price_rounded_down() {
    let intent = OrderIntent::limit("XUSDT", Side::Buy, dec!(10), dec!(27.256));

    let order = normalize(&intent, &filters(dec!(5)), None).unwrap();
    assert_eq!(order.price, Some(dec!(27.25)));
    assert_eq!(order.quantity, dec!(10));
}

#[test]
fn test_min_notional_unreachable_within_max_qty() {
    let filters = SymbolFilters {
        max_qty: dec!(1.0),
        ..filters(dec!(100000))
    };
    let intent = OrderIntent::market("BTCUSDT", Side::Sell, dec!(0.1));

    let err = normalize(&intent, &filters, Some(dec!(50000))).unwrap_err();
    assert_eq!(
        err,
        Rejection::ExceedsMaxQty {
            required: dec!(2),
            max_qty: dec!(1),
            cause: MaxQtyCause::MinNotional {
                min_notional: dec!(100000),
                price: dec!(50000),
            },
        }
    );
    let Rejection::ExceedsMaxQty { required, .. } = &err else {
        unreachable!();
    };
    assert_eq!(
        err.to_string(),
        format!(
            "quantity {required} required to reach minNotional 100000 at price 50000 \
             exceeds maxQty 1.0"
        )
    );
}

#[test]
fn test_huge_order_is_rejected_not_panicking() {
    let intent = OrderIntent::limit(
        "BTCUSDT",
        Side::Buy,
        dec!(100000000000000000000),
        dec!(10000000000),
    );

    let result = std::panic::catch_unwind(|| normalize(&intent, &filters(dec!(5)), None));
    let err = result.unwrap().unwrap_err();
    assert!(matches!(
        err,
        Rejection::ExceedsMaxQty {
            cause: MaxQtyCause::Requested,
            ..
        }
    ));
}

#[test]
fn test_concurrent_callers_agree() {
    let filters = filters(dec!(100));
    let intent = OrderIntent::limit("BTCUSDT", Side::Buy, dec!(0.0015), dec!(43210.987));
    let expected = normalize(&intent, &filters, None).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| normalize(&intent, &filters, None).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
