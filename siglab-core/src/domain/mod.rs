//! Domain types: position state and the immutable trade log.

pub mod position;
pub mod trade;

pub use position::Position;
pub use trade::{TradeAction, TradeRecord};
