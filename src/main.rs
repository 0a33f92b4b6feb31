use clap::Parser;
use order_bot::cli::{Cli, Commands};
use order_bot::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    order_bot::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Order(args) => {
            if let Err(e) = args.execute(&config).await {
                tracing::error!(error = %e, "Order placement failed");
                return Err(e);
            }
        }
        Commands::Rules(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Exchange: {}", config.exchange.base_url);
            println!(
                "  Timeouts: request={}s recvWindow={}ms",
                config.exchange.timeout_secs, config.exchange.recv_window_ms
            );
            println!("  Trades CSV: {}", config.data.trades_csv.display());
            println!(
                "  Logging: level={} format={:?} file={}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config
                    .telemetry
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            println!(
                "  Credentials: {}",
                if order_bot::config::Credentials::from_env().is_some() {
                    "set"
                } else {
                    "missing"
                }
            );
        }
    }

    Ok(())
}
