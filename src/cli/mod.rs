//! CLI interface for order-bot
//!
//! Provides subcommands for:
//! - `order`: Normalize and place a MARKET or LIMIT order
//! - `rules`: Show a symbol's exchange filters
//! - `config`: Show the effective configuration

mod order;
mod prompt;
mod rules;

pub use order::{OrderArgs, OrderOutcome};
pub use prompt::Console;
pub use rules::{render_rules, RulesArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "order-bot")]
#[command(about = "Places exchange-compliant orders on the Binance USD-M futures testnet")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize and place an order (prompts for missing fields)
    Order(OrderArgs),
    /// Show a symbol's exchange filters
    Rules(RulesArgs),
    /// Show the effective configuration
    Config,
}
