use crate::{AllocationRate, ErrorPolicy};

/// Creates instances of [`AllocationRate`].
///
/// Use `AllocationRate::builder()` to create a new instance of this builder.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationRate, ErrorPolicy};
///
/// let allocation_rate = AllocationRate::builder()
///     .error_policy(ErrorPolicy::CollapseToNoData)
///     .build();
///
/// assert_eq!(allocation_rate.error_policy(), ErrorPolicy::CollapseToNoData);
/// ```
#[derive(Debug)]
pub struct AllocationRateBuilder {
    error_policy: ErrorPolicy,
}

impl AllocationRateBuilder {
    pub(crate) fn new() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Sets how failures to calculate a rate are reported.
    ///
    /// Defaults to [`ErrorPolicy::DistinguishCalculationErrors`].
    #[must_use]
    pub fn error_policy(self, error_policy: ErrorPolicy) -> Self {
        Self { error_policy }
    }

    /// Creates the configured [`AllocationRate`].
    #[must_use]
    pub fn build(self) -> AllocationRate {
        AllocationRate::with_policy(self.error_policy)
    }
}
