//! Input series types and date-key alignment.

pub mod align;
pub mod series;

pub use align::{align_series, AlignError, AlignedSeries};
pub use series::{OscillatorPoint, PricePoint, SignalPoint};
