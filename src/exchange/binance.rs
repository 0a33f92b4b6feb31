//! Binance USD-M futures REST client
//!
//! Public endpoints supply symbol filters and the reference price for MARKET
//! orders; order placement goes through the HMAC-SHA256 signed
//! `POST /fapi/v1/order` endpoint.

use super::types::{ApiErrorBody, ExchangeInfo, RawFilter, TickerPrice};
use super::{ExchangeError, LotSize, MarketMetadata, OrderAck, OrderSubmitter, SymbolRules};
use crate::config::{Credentials, ExchangeConfig, FUTURES_TESTNET_URL};
use crate::order::{NormalizedOrder, OrderType};
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::time::{Duration, Instant};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Configuration for the futures client
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// REST base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// recvWindow sent with signed requests (milliseconds)
    pub recv_window_ms: u64,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: FUTURES_TESTNET_URL.to_string(),
            timeout: Duration::from_secs(10),
            recv_window_ms: 5000,
        }
    }
}

impl From<&ExchangeConfig> for BinanceConfig {
    fn from(config: &ExchangeConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            recv_window_ms: config.recv_window_ms,
        }
    }
}

/// Client for the Binance USD-M futures REST API
pub struct BinanceFuturesClient {
    config: BinanceConfig,
    client: Client,
    credentials: Option<Credentials>,
}

impl BinanceFuturesClient {
    /// Create an unauthenticated client (public endpoints only)
    pub fn new(config: BinanceConfig) -> Result<Self, ExchangeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            client,
            credentials: None,
        })
    }

    /// Attach API credentials for signed endpoints
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Whether signed endpoints can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Public GET request
    async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let url = self.url(path);
        tracing::debug!(url = %url, ?params, "GET");

        let response = self.client.get(&url).query(params).send().await?;
        handle_response(response).await
    }

    /// Signed POST request; parameters travel in the form body
    async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ExchangeError::MissingCredentials)?;

        let mut all_params = params.to_vec();
        all_params.push(("recvWindow", self.config.recv_window_ms.to_string()));
        all_params.push(("timestamp", Utc::now().timestamp_millis().to_string()));

        let query = build_query(&all_params);
        let signature = sign(&credentials.api_secret, &query)?;
        let url = self.url(path);

        tracing::debug!(url = %url, params = %query, "POST (signed)");

        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &credentials.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("{}&signature={}", query, signature))
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl MarketMetadata for BinanceFuturesClient {
    async fn symbol_rules(&self, symbol: &str) -> Result<SymbolRules, ExchangeError> {
        let started = Instant::now();
        let info: ExchangeInfo = self.public_get("/fapi/v1/exchangeInfo", &[]).await?;
        record_latency(LatencyMetric::ExchangeInfo, started.elapsed());

        rules_from_info(info, symbol)
    }

    async fn reference_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        let started = Instant::now();
        let ticker: TickerPrice = self
            .public_get("/fapi/v1/ticker/price", &[("symbol", symbol.to_string())])
            .await?;
        record_latency(LatencyMetric::TickerPrice, started.elapsed());

        tracing::debug!(symbol, price = %ticker.price, "Fetched reference price");
        Ok(ticker.price)
    }
}

#[async_trait]
impl OrderSubmitter for BinanceFuturesClient {
    async fn submit_order(&self, order: &NormalizedOrder) -> Result<OrderAck, ExchangeError> {
        let params = order_params(order, &new_client_order_id());

        let started = Instant::now();
        let ack: OrderAck = self.signed_post("/fapi/v1/order", &params).await?;
        record_latency(LatencyMetric::OrderSubmission, started.elapsed());

        tracing::info!(
            order_id = ack.order_id,
            status = %ack.status,
            symbol = %ack.symbol,
            "Order accepted by exchange"
        );
        Ok(ack)
    }
}

/// Read a response body and decode it
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ExchangeError> {
    let status = response.status();
    let body = response.text().await?;

    tracing::debug!(status = status.as_u16(), body = %body, "Response");

    decode(status, &body)
}

/// Decode a response body, turning non-2xx statuses into errors.
///
/// Error bodies in Binance's `{code, msg}` shape become [`ExchangeError::Api`],
/// anything else [`ExchangeError::Http`].
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ExchangeError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => ExchangeError::Api {
                status: status.as_u16(),
                code: err.code,
                msg: err.msg,
            },
            Err(_) => ExchangeError::Http {
                status: status.as_u16(),
                body: body.to_string(),
            },
        });
    }

    Ok(serde_json::from_str(body)?)
}

/// Extract one symbol's rules from an exchangeInfo payload
pub(crate) fn rules_from_info(
    info: ExchangeInfo,
    symbol: &str,
) -> Result<SymbolRules, ExchangeError> {
    let info = info
        .symbols
        .into_iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| ExchangeError::SymbolNotFound(symbol.to_string()))?;

    let mut price = None;
    let mut lot_size = None;
    let mut market_lot_size = None;
    let mut min_notional = None;

    for filter in info.filters {
        match filter {
            RawFilter::Price {
                min_price,
                max_price,
                tick_size,
            } => price = Some((min_price, max_price, tick_size)),
            RawFilter::LotSize {
                min_qty,
                max_qty,
                step_size,
            } => {
                lot_size = Some(LotSize {
                    min_qty,
                    max_qty,
                    step_size,
                })
            }
            RawFilter::MarketLotSize {
                min_qty,
                max_qty,
                step_size,
            } => {
                market_lot_size = Some(LotSize {
                    min_qty,
                    max_qty,
                    step_size,
                })
            }
            RawFilter::MinNotional { notional } => min_notional = Some(notional),
            RawFilter::Other => {}
        }
    }

    let missing = |filter: &'static str| ExchangeError::MissingFilter {
        symbol: info.symbol.clone(),
        filter,
    };
    let (min_price, max_price, tick_size) = price.ok_or_else(|| missing("PRICE_FILTER"))?;
    let lot_size = lot_size.ok_or_else(|| missing("LOT_SIZE"))?;
    let min_notional = min_notional.ok_or_else(|| missing("MIN_NOTIONAL"))?;

    Ok(SymbolRules {
        symbol: info.symbol.clone(),
        lot_size,
        market_lot_size,
        tick_size,
        min_price,
        max_price,
        min_notional,
    })
}

/// Request parameters for an order, excluding recvWindow/timestamp/signature
pub(crate) fn order_params(
    order: &NormalizedOrder,
    client_order_id: &str,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", order.symbol.clone()),
        ("side", order.side.to_string()),
        ("type", order.order_type.to_string()),
        ("quantity", order.quantity.to_string()),
    ];
    if order.order_type == OrderType::Limit {
        if let Some(price) = order.price {
            params.push(("timeInForce", "GTC".to_string()));
            params.push(("price", price.to_string()));
        }
    }
    params.push(("newClientOrderId", client_order_id.to_string()));
    params
}

/// Client order ids are limited to 36 characters
fn new_client_order_id() -> String {
    format!("ob-{}", Uuid::new_v4().simple())
}

/// Join parameters into a query string in the given order
fn build_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA256 signature of a query string, hex encoded
fn sign(secret: &str, query: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::Signing(e.to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
