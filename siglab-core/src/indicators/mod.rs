//! Indicator functions over plain price slices.
//!
//! Both indicators follow the same warmup convention: positions without
//! enough history are `f64::NAN`, and callers treat NaN as "no reading"
//! rather than an error.

pub mod rolling;
pub mod rsi;

pub use rolling::rolling_mean;
pub use rsi::rsi;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
