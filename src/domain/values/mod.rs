pub mod history_range;
pub mod option_kind;
pub mod thresholds;
pub mod ticker;
