//! The minimal view of an allocation event that the rate calculation needs.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

const NANOS_PER_MILLI: i128 = 1_000_000;
const MICROS_PER_MILLI: i128 = 1_000;
const MILLIS_PER_SECOND: i128 = 1_000;

/// The allocation mechanism through which an allocation event was served.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "allocations are either served from the thread-local buffer or they are not"
)]
pub enum AllocationPath {
    /// The allocation was served from a low-overhead per-thread allocation buffer.
    FastPath,

    /// The allocation was served outside the per-thread allocation buffer.
    SlowPath,
}

/// Capabilities the allocation rate calculation requires from an event.
///
/// Event collectors adapt their native event representation to this trait. The calculation
/// only ever reads from events and does not retain references to them after a call returns.
///
/// Implementations are provided for references and boxes of implementing types, so both
/// `&[MyEvent]`, `&[&MyEvent]` and `&[Box<dyn AllocationEvent>]` can be passed to
/// [`AllocationRate`][crate::AllocationRate].
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationEvent, AllocationPath, Result};
///
/// struct JfrItem {
///     inside_tlab: bool,
///     end_time_ms: i64,
/// }
///
/// impl AllocationEvent for JfrItem {
///     fn allocation_path(&self) -> Option<AllocationPath> {
///         Some(if self.inside_tlab {
///             AllocationPath::FastPath
///         } else {
///             AllocationPath::SlowPath
///         })
///     }
///
///     fn epoch_millis(&self) -> Result<i64> {
///         Ok(self.end_time_ms)
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait AllocationEvent {
    /// Classifies the event by allocation mechanism.
    ///
    /// Returns `None` if the item is not an allocation event at all. Such items are
    /// excluded from both the fast-path and the slow-path partitions.
    fn allocation_path(&self) -> Option<AllocationPath>;

    /// Resolves the timestamp of the event to milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampConversion`] if the native timestamp cannot be
    /// expressed in epoch milliseconds.
    fn epoch_millis(&self) -> Result<i64>;

    /// The number of bytes attributed to this event.
    ///
    /// Only used when the aggregate total is derived from the events themselves,
    /// see [`AllocationRate::evaluate_with_derived_total()`][crate::AllocationRate::evaluate_with_derived_total].
    fn allocated_bytes(&self) -> u64 {
        0
    }
}

impl<T> AllocationEvent for &T
where
    T: AllocationEvent + ?Sized,
{
    fn allocation_path(&self) -> Option<AllocationPath> {
        (**self).allocation_path()
    }

    fn epoch_millis(&self) -> Result<i64> {
        (**self).epoch_millis()
    }

    fn allocated_bytes(&self) -> u64 {
        (**self).allocated_bytes()
    }
}

impl<T> AllocationEvent for Box<T>
where
    T: AllocationEvent + ?Sized,
{
    fn allocation_path(&self) -> Option<AllocationPath> {
        (**self).allocation_path()
    }

    fn epoch_millis(&self) -> Result<i64> {
        (**self).epoch_millis()
    }

    fn allocated_bytes(&self) -> u64 {
        (**self).allocated_bytes()
    }
}

/// The unit of a raw [`EventTimestamp`] value, counted from the Unix epoch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeUnit {
    /// Nanoseconds since the Unix epoch.
    Nanoseconds,

    /// Microseconds since the Unix epoch.
    Microseconds,

    /// Milliseconds since the Unix epoch.
    Milliseconds,

    /// Seconds since the Unix epoch.
    Seconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
        };

        f.write_str(name)
    }
}

/// An absolute point in time as reported by an event collector, in the collector's own unit.
///
/// # Example
///
/// ```
/// use alloc_rate::{EventTimestamp, TimeUnit};
///
/// let timestamp = EventTimestamp::new(1_500_000, TimeUnit::Microseconds);
/// assert_eq!(timestamp.to_epoch_millis().unwrap(), 1_500);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EventTimestamp {
    value: i128,
    unit: TimeUnit,
}

impl EventTimestamp {
    /// Creates a timestamp from a raw value counted in `unit` since the Unix epoch.
    #[must_use]
    pub const fn new(value: i128, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_epoch_millis(millis: i64) -> Self {
        Self::new(millis as i128, TimeUnit::Milliseconds)
    }

    /// The raw timestamp value, in [`unit()`](Self::unit).
    #[must_use]
    pub const fn value(&self) -> i128 {
        self.value
    }

    /// The unit of the raw timestamp value.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Converts the timestamp to milliseconds since the Unix epoch.
    ///
    /// Sub-millisecond units are rounded towards negative infinity, so a point in time
    /// just before the epoch never becomes a non-negative millisecond value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampConversion`] if the value does not fit in an `i64`
    /// millisecond count.
    pub fn to_epoch_millis(&self) -> Result<i64> {
        let millis = match self.unit {
            TimeUnit::Nanoseconds => self.value.checked_div_euclid(NANOS_PER_MILLI),
            TimeUnit::Microseconds => self.value.checked_div_euclid(MICROS_PER_MILLI),
            TimeUnit::Milliseconds => Some(self.value),
            TimeUnit::Seconds => self.value.checked_mul(MILLIS_PER_SECOND),
        };

        millis
            .and_then(|millis| i64::try_from(millis).ok())
            .ok_or(Error::TimestampConversion {
                value: self.value,
                unit: self.unit,
            })
    }
}

impl From<SystemTime> for EventTimestamp {
    fn from(value: SystemTime) -> Self {
        let nanos = match value.duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => i128::try_from(since_epoch.as_nanos())
                .expect("a Duration expressed in nanoseconds always fits in i128"),
            Err(before_epoch) => i128::try_from(before_epoch.duration().as_nanos())
                .map(i128::wrapping_neg)
                .expect("a Duration expressed in nanoseconds always fits in i128"),
        };

        Self::new(nanos, TimeUnit::Nanoseconds)
    }
}

/// An allocation event owned by the caller, for collectors without a richer native type.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationPath, EventTimestamp, RecordedEvent, compute_allocation_rate};
///
/// let events = [
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(1_000)),
///     RecordedEvent::new(AllocationPath::SlowPath, EventTimestamp::from_epoch_millis(3_000)),
/// ];
///
/// assert_eq!(compute_allocation_rate(&events, 4096), "2.0 KiB/s");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecordedEvent {
    path: AllocationPath,
    timestamp: EventTimestamp,
    allocated_bytes: u64,
}

impl RecordedEvent {
    /// Creates an event that attributes no bytes to itself.
    #[must_use]
    pub const fn new(path: AllocationPath, timestamp: EventTimestamp) -> Self {
        Self {
            path,
            timestamp,
            allocated_bytes: 0,
        }
    }

    /// Attributes a number of allocated bytes to the event.
    #[must_use]
    pub const fn with_allocated_bytes(self, allocated_bytes: u64) -> Self {
        Self {
            allocated_bytes,
            ..self
        }
    }

    /// The allocation mechanism that served the event.
    #[must_use]
    pub const fn path(&self) -> AllocationPath {
        self.path
    }

    /// When the event happened.
    #[must_use]
    pub const fn timestamp(&self) -> EventTimestamp {
        self.timestamp
    }
}

impl AllocationEvent for RecordedEvent {
    fn allocation_path(&self) -> Option<AllocationPath> {
        Some(self.path)
    }

    fn epoch_millis(&self) -> Result<i64> {
        self.timestamp.to_epoch_millis()
    }

    fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes
    }
}
