//! Prepare and submit orders
//!
//! All exchange I/O happens around the pure normalizer: metadata and the
//! reference price are fetched before it runs, submission happens after.

use super::{PrepareError, PreparedOrder};
use crate::exchange::{ExchangeError, MarketMetadata, OrderAck, OrderSubmitter, SymbolRules};
use crate::order::{normalize_explained, OrderIntent, OrderType};
use crate::telemetry::{increment, CounterMetric};

/// Fetch the symbol rules and normalize an intent against them
pub async fn prepare<M>(metadata: &M, intent: OrderIntent) -> Result<PreparedOrder, PrepareError>
where
    M: MarketMetadata + ?Sized,
{
    let rules = metadata.symbol_rules(&intent.symbol).await?;
    prepare_with_rules(metadata, &rules, intent).await
}

/// Normalize an intent against already-fetched rules.
///
/// MARKET orders still fetch a fresh reference price.
pub async fn prepare_with_rules<M>(
    metadata: &M,
    rules: &SymbolRules,
    intent: OrderIntent,
) -> Result<PreparedOrder, PrepareError>
where
    M: MarketMetadata + ?Sized,
{
    let reference_price = match intent.order_type {
        OrderType::Market => Some(metadata.reference_price(&intent.symbol).await?),
        OrderType::Limit => None,
    };

    let filters = rules.filters_for(intent.order_type);
    let normalization = match normalize_explained(&intent, &filters, reference_price) {
        Ok(n) => n,
        Err(rejection) => {
            increment(CounterMetric::Normalization, rejection.kind());
            tracing::warn!(
                symbol = %intent.symbol,
                kind = rejection.kind(),
                reason = %rejection,
                "Order rejected"
            );
            return Err(rejection.into());
        }
    };

    increment(CounterMetric::Normalization, "accepted");
    for adjustment in &normalization.adjustments {
        tracing::info!(symbol = %intent.symbol, "{}", adjustment);
    }
    tracing::info!(
        symbol = %normalization.order.symbol,
        side = %normalization.order.side,
        order_type = %normalization.order.order_type,
        quantity = %normalization.order.quantity,
        price = ?normalization.order.price,
        "Order normalized"
    );

    Ok(PreparedOrder {
        intent,
        rules: rules.clone(),
        reference_price,
        order: normalization.order,
        adjustments: normalization.adjustments,
        effective_price: normalization.effective_price,
    })
}

/// Submit a prepared order
pub async fn submit<S>(submitter: &S, prepared: &PreparedOrder) -> Result<OrderAck, ExchangeError>
where
    S: OrderSubmitter + ?Sized,
{
    match submitter.submit_order(&prepared.order).await {
        Ok(ack) => {
            increment(CounterMetric::Submission, "accepted");
            tracing::info!(order_id = ack.order_id, status = %ack.status, "Order placed");
            Ok(ack)
        }
        Err(e) => {
            increment(CounterMetric::Submission, e.kind());
            tracing::error!(error = %e, "Order submission failed");
            Err(e)
        }
    }
}
