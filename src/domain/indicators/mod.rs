//! Technical indicators over a close-price series.
//!
//! Every function returns one output per input position, `None` where the
//! window is not yet filled. A series shorter than the window therefore
//! yields all `None` rather than an error.

pub mod rsi;
pub mod signal;
pub mod sma;
