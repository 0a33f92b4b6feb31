//! Counters and latency histograms
//!
//! Recorded through the `metrics` facade; without an installed recorder the
//! calls are no-ops.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// exchangeInfo download
    ExchangeInfo,
    /// Reference price lookup
    TickerPrice,
    /// Order submission round trip
    OrderSubmission,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::ExchangeInfo => "orderbot_exchange_info_latency_ms",
            LatencyMetric::TickerPrice => "orderbot_ticker_price_latency_ms",
            LatencyMetric::OrderSubmission => "orderbot_order_submission_latency_ms",
        }
    }
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Normalizations, labelled by outcome
    Normalization,
    /// Submissions, labelled by outcome
    Submission,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::Normalization => "orderbot_normalizations_total",
            CounterMetric::Submission => "orderbot_submissions_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = metric.name();
    let value_ms = duration.as_secs_f64() * 1000.0;

    metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Increment a counter with an outcome label
pub fn increment(metric: CounterMetric, outcome: &'static str) {
    let metric_name = metric.name();

    metrics::counter!(metric_name, "outcome" => outcome).increment(1);
    tracing::debug!(metric = metric_name, outcome, "Incrementing counter");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert_eq!(
            LatencyMetric::OrderSubmission.name(),
            "orderbot_order_submission_latency_ms"
        );
        assert_eq!(
            CounterMetric::Normalization.name(),
            "orderbot_normalizations_total"
        );
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_latency(LatencyMetric::TickerPrice, Duration::from_millis(12));
        increment(CounterMetric::Submission, "accepted");
    }
}
