use crate::{Error, RateOutcome};

/// Decides how a failure to calculate an allocation rate is reported.
///
/// Failures never reach the caller of [`AllocationRate`][crate::AllocationRate] as errors;
/// the policy only decides which of the two non-rate outcomes each failure becomes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorPolicy {
    /// Reports [`RateOutcome::NoData`] when there is nothing to measure (no allocation events,
    /// or all of them in the same millisecond) and [`RateOutcome::CalculationError`] when the
    /// events are inconsistent.
    #[default]
    DistinguishCalculationErrors,

    /// Reports every failure as [`RateOutcome::NoData`].
    CollapseToNoData,
}

impl ErrorPolicy {
    /// The outcome that `error` is reported as under this policy.
    ///
    /// # Example
    ///
    /// ```
    /// use alloc_rate::{Error, ErrorPolicy, RateOutcome};
    ///
    /// let error = Error::InvertedWindow { start: 10, end: 5 };
    ///
    /// assert_eq!(
    ///     ErrorPolicy::DistinguishCalculationErrors.outcome_for(&error),
    ///     RateOutcome::CalculationError
    /// );
    /// assert_eq!(
    ///     ErrorPolicy::CollapseToNoData.outcome_for(&error),
    ///     RateOutcome::NoData
    /// );
    /// ```
    #[must_use]
    pub fn outcome_for(self, error: &Error) -> RateOutcome {
        match self {
            Self::CollapseToNoData => RateOutcome::NoData,
            Self::DistinguishCalculationErrors => match error {
                Error::NoEvents | Error::ZeroDuration => RateOutcome::NoData,
                Error::TimestampConversion { .. }
                | Error::NegativeTimestamp { .. }
                | Error::InvertedWindow { .. }
                | Error::NegativeDuration { .. }
                | Error::TotalBytesOverflow => RateOutcome::CalculationError,
            },
        }
    }
}
