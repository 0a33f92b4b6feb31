//! Integration tests

mod config_test;
mod normalize_test;
mod order_flow_test;
