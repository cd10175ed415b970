pub mod http;
pub mod market_data;
pub mod options;
pub mod sqlite;
