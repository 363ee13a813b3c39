use crate::{Error, Result, TimeWindow};

const MILLIS_PER_SECOND: f64 = 1000.0;

/// A total number of allocated bytes together with the time it took to allocate them.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationRateSample, TimeWindow};
///
/// let window = TimeWindow::new(1_000, 11_000).unwrap();
/// let sample = AllocationRateSample::from_window(1024, &window);
///
/// assert_eq!(sample.bytes_per_second().unwrap(), 102.4);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AllocationRateSample {
    total_bytes: u64,
    duration_millis: i64,
}

impl AllocationRateSample {
    /// Creates a sample from a byte total and a duration in milliseconds.
    ///
    /// The duration is not validated here; see [`bytes_per_second()`](Self::bytes_per_second).
    #[must_use]
    pub fn new(total_bytes: u64, duration_millis: i64) -> Self {
        Self {
            total_bytes,
            duration_millis,
        }
    }

    /// Creates a sample covering the duration of `window`.
    ///
    /// `total_bytes` is the aggregate over the full event collection the window was
    /// extracted from, not only over the partitioned allocation events.
    #[must_use]
    pub fn from_window(total_bytes: u64, window: &TimeWindow) -> Self {
        Self::new(total_bytes, window.duration_millis())
    }

    /// Total bytes allocated during the sample.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// How long the sample lasted, in milliseconds.
    #[must_use]
    pub fn duration_millis(&self) -> i64 {
        self.duration_millis
    }

    /// Calculates the allocation rate in bytes per second.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroDuration`] if the sample has no duration, in which case the
    /// rate is undefined, and [`Error::NegativeDuration`] if the duration is negative.
    #[expect(
        clippy::cast_precision_loss,
        reason = "rates are reported with one decimal digit, far coarser than f64 precision loss"
    )]
    pub fn bytes_per_second(&self) -> Result<f64> {
        let duration_seconds = self.duration_millis as f64 / MILLIS_PER_SECOND;

        if duration_seconds > 0.0 {
            Ok(self.total_bytes as f64 / duration_seconds)
        } else if self.duration_millis == 0 {
            Err(Error::ZeroDuration)
        } else {
            Err(Error::NegativeDuration {
                millis: self.duration_millis,
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "exact values are representable")]
    fn whole_seconds() {
        let sample = AllocationRateSample::new(3_000, 1_500);

        assert_eq!(sample.bytes_per_second().unwrap(), 2_000.0);
    }

    #[test]
    fn fractional_rate() {
        let rate = AllocationRateSample::new(1024, 10_000)
            .bytes_per_second()
            .unwrap();

        assert!((rate - 102.4).abs() < 1e-9);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact values are representable")]
    fn no_bytes_is_zero_rate() {
        let sample = AllocationRateSample::new(0, 5_000);

        assert_eq!(sample.bytes_per_second().unwrap(), 0.0);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let sample = AllocationRateSample::new(1_000, 0);

        assert!(matches!(sample.bytes_per_second(), Err(Error::ZeroDuration)));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let sample = AllocationRateSample::new(1_000, -5);

        assert!(matches!(
            sample.bytes_per_second(),
            Err(Error::NegativeDuration { millis: -5 })
        ));
    }

    #[test]
    fn from_window_uses_window_duration() {
        let window = TimeWindow::new(250, 1_250).unwrap();

        let sample = AllocationRateSample::from_window(42, &window);

        assert_eq!(sample.total_bytes(), 42);
        assert_eq!(sample.duration_millis(), 1_000);
    }
}
