pub mod market_data;
pub mod options_flow;
pub mod signal_repository;
