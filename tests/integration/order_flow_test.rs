//! Integration tests for the order command flow

use async_trait::async_trait;
use order_bot::cli::{Console, OrderArgs, OrderOutcome};
use order_bot::data::TradeRecorder;
use order_bot::exchange::{
    ExchangeError, LotSize, MarketMetadata, OrderAck, OrderSubmitter, SymbolRules,
};
use order_bot::execution::PrepareError;
use order_bot::order::{NormalizedOrder, OrderType, Rejection, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Mutex;

struct TestExchange {
    submitted: Mutex<Vec<NormalizedOrder>>,
}

impl TestExchange {
    fn new() -> Self {
        Self {
            submitted: Mutex::new(vec![]),
        }
    }

    fn submitted(&self) -> Vec<NormalizedOrder> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketMetadata for TestExchange {
    async fn symbol_rules(&self, symbol: &str) -> Result<SymbolRules, ExchangeError> {
        Ok(SymbolRules {
            symbol: symbol.to_string(),
            lot_size: LotSize {
                min_qty: dec!(0.001),
                max_qty: dec!(1000),
                step_size: dec!(0.001),
            },
            market_lot_size: None,
            tick_size: dec!(0.10),
            min_price: dec!(261.10),
            max_price: dec!(809484),
            min_notional: dec!(100),
        })
    }

    async fn reference_price(&self, _symbol: &str) -> Result<Decimal, ExchangeError> {
        Ok(dec!(50000))
    }
}

#[async_trait]
impl OrderSubmitter for TestExchange {
    async fn submit_order(&self, order: &NormalizedOrder) -> Result<OrderAck, ExchangeError> {
        self.submitted.lock().unwrap().push(order.clone());
        Ok(OrderAck {
            order_id: 1001,
            client_order_id: "ob-int".to_string(),
            symbol: order.symbol.clone(),
            status: "NEW".to_string(),
            side: order.side,
            order_type: order.order_type,
            price: order.price.unwrap_or_default(),
            avg_price: dec!(50000),
            orig_qty: order.quantity,
            executed_qty: Decimal::ZERO,
            update_time: None,
        })
    }
}

fn console(input: &str) -> Console<&[u8], Vec<u8>> {
    Console::new(input.as_bytes(), Vec::new())
}

fn limit_args() -> OrderArgs {
    OrderArgs {
        symbol: Some("btcusdt".to_string()),
        side: Some(Side::Buy),
        order_type: Some(OrderType::Limit),
        quantity: Some(dec!(0.001)),
        price: Some(dec!(50000.07)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dry_run_does_not_submit() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("");

    let args = OrderArgs {
        dry_run: true,
        ..limit_args()
    };
    let outcome = args.run(&exchange, &recorder, &mut console).await.unwrap();

    let OrderOutcome::DryRun(prepared) = outcome else {
        panic!("expected dry run");
    };
    assert_eq!(prepared.order.symbol, "BTCUSDT");
    assert_eq!(prepared.order.price, Some(dec!(50000)));
    assert_eq!(prepared.order.quantity, dec!(0.002));
    assert!(exchange.submitted().is_empty());
    assert!(!recorder.path().exists());

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Symbol rules for BTCUSDT:"));
    assert!(output.contains("Note: price adjusted from 50000.07 to 50000"));
    assert!(output.contains("is below minNotional 100, quantity raised from 0.001 to 0.002"));
    assert_eq!(output.matches("quantity raised from").count(), 1);
    assert!(!output.contains("minNotional/stepSize"));
    assert!(output.contains("Dry-run enabled. Not placing order."));
}

#[tokio::test]
async fn test_declined_confirmation_aborts() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("n\n");

    let outcome = limit_args()
        .run(&exchange, &recorder, &mut console)
        .await
        .unwrap();

    assert!(matches!(outcome, OrderOutcome::Aborted(_)));
    assert!(exchange.submitted().is_empty());
}

#[tokio::test]
async fn test_confirmed_order_is_submitted_and_recorded() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("y\n");

    let outcome = limit_args()
        .run(&exchange, &recorder, &mut console)
        .await
        .unwrap();

    let OrderOutcome::Placed { ack, .. } = outcome else {
        panic!("expected placed order");
    };
    assert_eq!(ack.order_id, 1001);
    assert_eq!(exchange.submitted().len(), 1);

    let csv = std::fs::read_to_string(recorder.path()).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains(",BTCUSDT,BUY,LIMIT,50000,0.002,100.000,1001,NEW"));
}

#[tokio::test]
async fn test_interactive_market_order() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("ethusdt\nsell\nmarket\n0.01\n");

    let args = OrderArgs {
        yes: true,
        ..Default::default()
    };
    let outcome = args.run(&exchange, &recorder, &mut console).await.unwrap();

    let OrderOutcome::Placed { prepared, ack } = outcome else {
        panic!("expected placed order");
    };
    assert_eq!(prepared.order.symbol, "ETHUSDT");
    assert_eq!(prepared.order.side, Side::Sell);
    assert_eq!(prepared.order.order_type, OrderType::Market);
    assert_eq!(prepared.order.quantity, dec!(0.01));
    assert!(prepared.order.price.is_none());
    assert_eq!(ack.display_price(), dec!(50000));
}

#[tokio::test]
async fn test_interactive_unknown_side() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("BTCUSDT\nHOLD\n");

    let err = OrderArgs::default()
        .run(&exchange, &recorder, &mut console)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("unknown side 'HOLD'"));
    assert!(exchange.submitted().is_empty());
}

#[tokio::test]
async fn test_limit_flags_without_price_are_rejected() {
    let exchange = TestExchange::new();
    let dir = tempfile::tempdir().unwrap();
    let recorder = TradeRecorder::new(dir.path().join("trades.csv"));
    let mut console = console("");

    let args = OrderArgs {
        price: None,
        yes: true,
        ..limit_args()
    };
    let err = args
        .run(&exchange, &recorder, &mut console)
        .await
        .unwrap_err();

    let prepare_err = err.downcast_ref::<PrepareError>().unwrap();
    assert!(matches!(prepare_err, PrepareError::Rejected(Rejection::InvalidIntent(_))));
    assert!(exchange.submitted().is_empty());
}
