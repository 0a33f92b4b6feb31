//! Rules command implementation

use crate::config::Config;
use crate::exchange::{BinanceConfig, BinanceFuturesClient, MarketMetadata, SymbolRules};
use clap::Args;

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Symbol, e.g. BTCUSDT
    pub symbol: String,
}

impl RulesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = BinanceFuturesClient::new(BinanceConfig::from(&config.exchange))?;
        let rules = client.symbol_rules(&self.symbol.to_uppercase()).await?;

        println!("{}", render_rules(&rules));
        tracing::info!(symbol = %rules.symbol, "Displayed symbol rules");
        Ok(())
    }
}

/// Human-readable summary of a symbol's filters
pub fn render_rules(rules: &SymbolRules) -> String {
    let lot = &rules.lot_size;
    let mut out = format!(
        "Symbol rules for {}:\n  minQty: {}  maxQty: {}  stepSize: {}\n",
        rules.symbol, lot.min_qty, lot.max_qty, lot.step_size
    );
    if let Some(market) = &rules.market_lot_size {
        out.push_str(&format!(
            "  market minQty: {}  market maxQty: {}  market stepSize: {}\n",
            market.min_qty, market.max_qty, market.step_size
        ));
    }
    out.push_str(&format!(
        "  tickSize: {}  minPrice: {}  maxPrice: {}\n  minNotional: {}\n",
        rules.tick_size, rules.min_price, rules.max_price, rules.min_notional
    ));
    out
}
