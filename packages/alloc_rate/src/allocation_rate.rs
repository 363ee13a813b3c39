use tracing::debug;

use crate::{
    AllocationEvent, AllocationRateBuilder, AllocationRateSample, Error, ErrorPolicy, Partitions,
    RateOutcome, Result, TimeWindow,
};

/// Calculates the allocation rate of a unit of work from its allocation events.
///
/// The calculation derives the time window spanned by the fast-path and slow-path allocation
/// events, divides the total number of allocated bytes by the length of that window and
/// renders the result with binary unit scaling.
///
/// Evaluation never fails: every problem with the events is reported as
/// [`RateOutcome::NoData`] or [`RateOutcome::CalculationError`], as decided by the
/// configured [`ErrorPolicy`].
///
/// The type holds no mutable state and can be shared freely between threads.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationPath, AllocationRate, EventTimestamp, RecordedEvent};
///
/// let events = [
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(1_000)),
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(2_000)),
///     RecordedEvent::new(AllocationPath::SlowPath, EventTimestamp::from_epoch_millis(11_000)),
/// ];
///
/// let allocation_rate = AllocationRate::new();
///
/// assert_eq!(
///     allocation_rate.format_as_string(&events, 1024 * 1024),
///     "102.4 KiB/s"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AllocationRate {
    error_policy: ErrorPolicy,
}

impl AllocationRate {
    /// Creates an instance with the default [`ErrorPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts configuring an instance with non-default settings.
    #[must_use]
    pub fn builder() -> AllocationRateBuilder {
        AllocationRateBuilder::new()
    }

    pub(crate) fn with_policy(error_policy: ErrorPolicy) -> Self {
        Self { error_policy }
    }

    /// How failures to calculate a rate are reported.
    #[must_use]
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Evaluates the allocation rate of `events`.
    ///
    /// `total_bytes` is the number of bytes allocated across the entire event collection,
    /// as aggregated by the event collector.
    ///
    /// An empty collection is reported as [`RateOutcome::NoData`] without inspecting
    /// anything else.
    pub fn evaluate<E>(&self, events: &[E], total_bytes: u64) -> RateOutcome
    where
        E: AllocationEvent,
    {
        if events.is_empty() {
            return RateOutcome::NoData;
        }

        self.to_outcome(bytes_per_second(events, total_bytes))
    }

    /// Evaluates the allocation rate of `events`, summing the bytes attributed to each
    /// individual event to obtain the total.
    ///
    /// Events that are not allocation events still contribute their bytes to the total.
    pub fn evaluate_with_derived_total<E>(&self, events: &[E]) -> RateOutcome
    where
        E: AllocationEvent,
    {
        if events.is_empty() {
            return RateOutcome::NoData;
        }

        let result =
            total_bytes(events).and_then(|total_bytes| bytes_per_second(events, total_bytes));

        self.to_outcome(result)
    }

    /// Evaluates the allocation rate of `events` and renders it for display.
    ///
    /// Equivalent to `self.evaluate(events, total_bytes).to_string()`.
    #[must_use]
    pub fn format_as_string<E>(&self, events: &[E], total_bytes: u64) -> String
    where
        E: AllocationEvent,
    {
        self.evaluate(events, total_bytes).to_string()
    }

    fn to_outcome(self, result: Result<f64>) -> RateOutcome {
        match result {
            Ok(bytes_per_second) => RateOutcome::Rate { bytes_per_second },
            Err(error) => {
                let outcome = self.error_policy.outcome_for(&error);
                debug!(%error, ?outcome, "allocation rate is not available");
                outcome
            }
        }
    }
}

/// Renders the allocation rate of `events` using the default [`ErrorPolicy`].
///
/// Always returns a displayable string, see [`RateOutcome`].
///
/// # Example
///
/// ```
/// use alloc_rate::{NO_DATA, RecordedEvent, compute_allocation_rate};
///
/// let events: [RecordedEvent; 0] = [];
///
/// assert_eq!(compute_allocation_rate(&events, 0), NO_DATA);
/// ```
#[must_use]
pub fn compute_allocation_rate<E>(events: &[E], total_allocated_bytes: u64) -> String
where
    E: AllocationEvent,
{
    AllocationRate::new().format_as_string(events, total_allocated_bytes)
}

fn bytes_per_second<E>(events: &[E], total_bytes: u64) -> Result<f64>
where
    E: AllocationEvent,
{
    let partitions = Partitions::split(events);
    let window = TimeWindow::extract(partitions.fast_path(), partitions.slow_path())?;

    AllocationRateSample::from_window(total_bytes, &window).bytes_per_second()
}

fn total_bytes<E>(events: &[E]) -> Result<u64>
where
    E: AllocationEvent,
{
    events.iter().try_fold(0_u64, |total, event| {
        total
            .checked_add(event.allocated_bytes())
            .ok_or(Error::TotalBytesOverflow)
    })
}
