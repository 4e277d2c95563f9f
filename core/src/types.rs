//! Shared primitive types used across the crate.

/// A customer identifier. Unique within one generated dataset.
pub type CustomerId = u32;

/// Calendar period key in `YYYY-MM` form.
pub type PeriodKey = String;

/// Round a currency amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
