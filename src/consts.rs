use std::time::Duration;

/// Pump price per liter, in rupiah. Overridable through `PRICE_PER_LITER`.
pub const DEFAULT_PRICE_PER_LITER: f64 = 11_500.0;

/// Upper bound for each derived posting branch after a setoran is created.
pub const POSTING_TIMEOUT: Duration = Duration::from_secs(5);

/// Decimal digits kept by the numeric input normalizer.
pub const MAX_FRACTION_DIGITS: usize = 3;
