pub mod option_contract;
pub mod price_series;
pub mod signal_record;
