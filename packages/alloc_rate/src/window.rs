use tracing::{trace, warn};

use crate::{AllocationEvent, Error, Partition, Result};

/// The span of time covered by a set of allocation events, in milliseconds since the Unix epoch.
///
/// Both bounds are inclusive and the window is never inverted: `0 <= start <= end`.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationPath, EventTimestamp, Partitions, RecordedEvent, TimeWindow};
///
/// let events = [
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(1_000)),
///     RecordedEvent::new(AllocationPath::SlowPath, EventTimestamp::from_epoch_millis(11_000)),
/// ];
///
/// let partitions = Partitions::split(&events);
/// let window = TimeWindow::extract(partitions.fast_path(), partitions.slow_path()).unwrap();
///
/// assert_eq!(window.start(), 1_000);
/// assert_eq!(window.end(), 11_000);
/// assert_eq!(window.duration_millis(), 10_000);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeTimestamp`] if either bound is before the epoch and
    /// [`Error::InvertedWindow`] if `start` is after `end`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        ensure_not_negative(start)?;
        ensure_not_negative(end)?;

        if start > end {
            return Err(Error::InvertedWindow { start, end });
        }

        Ok(Self { start, end })
    }

    /// Computes the smallest window that contains every event of both partitions.
    ///
    /// An empty partition contributes nothing to the window. Each partition is scanned once
    /// for its earliest and once for its latest timestamp.
    ///
    /// # Errors
    ///
    /// * [`Error::NoEvents`] if both partitions are empty.
    /// * [`Error::TimestampConversion`] if the timestamp of any event cannot be resolved.
    ///   A single unresolvable timestamp fails the whole computation.
    /// * [`Error::NegativeTimestamp`] if any timestamp is before the epoch.
    /// * [`Error::InvertedWindow`] if the earliest timestamp is after the latest one, which
    ///   can only happen if events report different timestamps on different reads.
    pub fn extract<E>(fast_path: &Partition<'_, E>, slow_path: &Partition<'_, E>) -> Result<Self>
    where
        E: AllocationEvent,
    {
        if fast_path.is_empty() && slow_path.is_empty() {
            return Err(Error::NoEvents);
        }

        let start = [earliest(fast_path)?, earliest(slow_path)?]
            .into_iter()
            .flatten()
            .min();

        let end = [latest(fast_path)?, latest(slow_path)?]
            .into_iter()
            .flatten()
            .max();

        let (Some(start), Some(end)) = (start, end) else {
            return Err(Error::NoEvents);
        };

        trace!(start, end, "extracted allocation time window");

        Self::new(start, end)
    }

    /// The earliest point in the window.
    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The latest point in the window.
    #[must_use]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The length of the window, in milliseconds.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "both bounds are non-negative and start <= end, so the difference cannot overflow"
    )]
    pub fn duration_millis(&self) -> i64 {
        self.end - self.start
    }
}

fn earliest<E>(partition: &Partition<'_, E>) -> Result<Option<i64>>
where
    E: AllocationEvent,
{
    let mut earliest: Option<i64> = None;

    for event in partition.events() {
        let millis = resolve_millis(event)?;
        earliest = Some(earliest.map_or(millis, |current| current.min(millis)));
    }

    Ok(earliest)
}

fn latest<E>(partition: &Partition<'_, E>) -> Result<Option<i64>>
where
    E: AllocationEvent,
{
    let mut latest: Option<i64> = None;

    for event in partition.events() {
        let millis = resolve_millis(event)?;
        latest = Some(latest.map_or(millis, |current| current.max(millis)));
    }

    Ok(latest)
}

fn resolve_millis<E>(event: &E) -> Result<i64>
where
    E: AllocationEvent,
{
    let millis = event.epoch_millis().inspect_err(|error| {
        warn!(%error, "unable to convert the timestamp of an allocation event into milliseconds");
    })?;

    ensure_not_negative(millis)?;

    Ok(millis)
}

fn ensure_not_negative(millis: i64) -> Result<()> {
    if millis < 0 {
        return Err(Error::NegativeTimestamp { millis });
    }

    Ok(())
}
