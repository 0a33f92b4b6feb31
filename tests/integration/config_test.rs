//! Integration tests for configuration loading

use order_bot::config::{Config, LogFormat};

#[test]
fn test_config_example_loads() {
    let toml = include_str!("../../config.toml.example");

    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.exchange.base_url, "https://testnet.binancefuture.com");
    assert_eq!(config.exchange.recv_window_ms, 5000);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}
