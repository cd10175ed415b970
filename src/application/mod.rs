pub mod analyze;
pub mod chart;
pub mod history;
pub mod options_flow;
