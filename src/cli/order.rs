//! Order command implementation

use super::prompt::Console;
use super::rules::render_rules;
use crate::config::{Config, Credentials};
use crate::data::TradeRecorder;
use crate::exchange::{
    BinanceConfig, BinanceFuturesClient, MarketMetadata, OrderAck, OrderSubmitter,
};
use crate::execution::{self, PreparedOrder};
use crate::order::{OrderIntent, OrderType, Side};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    /// Symbol, e.g. BTCUSDT
    #[arg(long)]
    pub symbol: Option<String>,

    /// BUY or SELL
    #[arg(long, value_name = "BUY|SELL")]
    pub side: Option<Side>,

    /// MARKET or LIMIT
    #[arg(long = "type", value_name = "MARKET|LIMIT")]
    pub order_type: Option<OrderType>,

    /// Quantity in contract units
    #[arg(long)]
    pub quantity: Option<Decimal>,

    /// Limit price (LIMIT orders)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Place the order without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show the adjusted order but do not place it
    #[arg(long)]
    pub dry_run: bool,
}

/// How an order command ended
#[derive(Debug)]
pub enum OrderOutcome {
    /// Normalized and shown, not submitted
    DryRun(PreparedOrder),
    /// User declined the confirmation
    Aborted(PreparedOrder),
    /// Accepted by the exchange
    Placed {
        prepared: PreparedOrder,
        ack: OrderAck,
    },
}

impl OrderArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut client = BinanceFuturesClient::new(BinanceConfig::from(&config.exchange))?;
        match Credentials::from_env() {
            Some(credentials) => client = client.with_credentials(credentials),
            None if !self.dry_run => {
                anyhow::bail!("Set BINANCE_API_KEY and BINANCE_API_SECRET (or use --dry-run)")
            }
            None => tracing::debug!("No API credentials, dry-run only"),
        }

        let recorder = TradeRecorder::new(&config.data.trades_csv);
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout());

        self.run(&client, &recorder, &mut console).await?;
        Ok(())
    }

    /// Whether any required field must be asked for
    fn is_interactive(&self) -> bool {
        self.symbol.is_none()
            || self.side.is_none()
            || self.order_type.is_none()
            || self.quantity.is_none()
    }

    /// Collect the intent, normalize it, confirm and submit
    pub async fn run<E, R, W>(
        &self,
        exchange: &E,
        recorder: &TradeRecorder,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<OrderOutcome>
    where
        E: MarketMetadata + OrderSubmitter,
        R: BufRead,
        W: Write,
    {
        let interactive = self.is_interactive();

        let symbol = match &self.symbol {
            Some(symbol) => symbol.trim().to_uppercase(),
            None => console.ask("Symbol (e.g., BTCUSDT): ")?.to_uppercase(),
        };

        let rules = exchange.symbol_rules(&symbol).await?;
        console.say(render_rules(&rules))?;

        let side = match self.side {
            Some(side) => side,
            None => console.ask("Side (BUY/SELL): ")?.parse()?,
        };
        let order_type = match self.order_type {
            Some(order_type) => order_type,
            None => console.ask("Type (MARKET/LIMIT): ")?.parse()?,
        };
        let quantity = match self.quantity {
            Some(quantity) => quantity,
            None => parse_decimal(&console.ask("Quantity: ")?, "quantity")?,
        };
        let price = match (order_type, self.price) {
            (OrderType::Limit, None) if interactive => {
                Some(parse_decimal(&console.ask("Price: ")?, "price")?)
            }
            (OrderType::Limit, price) => price,
            (OrderType::Market, _) => None,
        };

        let intent = OrderIntent {
            symbol,
            side,
            order_type,
            quantity,
            price,
        };
        tracing::info!(
            symbol = %intent.symbol,
            side = %intent.side,
            order_type = %intent.order_type,
            quantity = %intent.quantity,
            price = ?intent.price,
            "Request"
        );

        let prepared = execution::prepare_with_rules(exchange, &rules, intent).await?;

        console.say(&prepared)?;
        for adjustment in &prepared.adjustments {
            console.say(format!("Note: {}", adjustment))?;
        }
        if prepared.quantity_changed() {
            tracing::info!(
                from = %prepared.intent.quantity,
                to = %prepared.order.quantity,
                "Quantity adjusted"
            );
        }

        if self.dry_run {
            console.say("Dry-run enabled. Not placing order.")?;
            return Ok(OrderOutcome::DryRun(prepared));
        }

        if !self.yes && !console.confirm("Proceed to place order? (y/n): ")? {
            console.say("Aborted by user.")?;
            tracing::info!("Order aborted by user");
            return Ok(OrderOutcome::Aborted(prepared));
        }

        let ack = execution::submit(exchange, &prepared).await?;

        console.say("\n=== ORDER RESULT ===")?;
        console.say(serde_json::to_string_pretty(&ack)?)?;

        match recorder.record(&ack) {
            Ok(_) => tracing::debug!(path = ?recorder.path(), "Trade recorded"),
            Err(e) => tracing::error!(error = %e, "Failed to write trade CSV"),
        }

        Ok(OrderOutcome::Placed { prepared, ack })
    }
}

fn parse_decimal(input: &str, field: &str) -> anyhow::Result<Decimal> {
    input
        .parse::<Decimal>()
        .with_context(|| format!("invalid {}: '{}'", field, input))
}
