use thiserror::Error;

use crate::TimeUnit;

/// Reasons why an allocation rate cannot be computed from a set of events.
///
/// Some of these are expected steady-state outcomes (e.g. a unit of work that allocated nothing
/// or finished within a single millisecond) rather than faults. [`AllocationRate`][crate::AllocationRate]
/// decides how each kind is surfaced to the caller, see [`ErrorPolicy`][crate::ErrorPolicy].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Neither the fast-path nor the slow-path partition contains any allocation events.
    #[error("no allocation events in either the fast-path or the slow-path partition")]
    NoEvents,

    /// The timestamp of an event could not be expressed as epoch milliseconds.
    #[error("timestamp {value} ({unit}) cannot be expressed as epoch milliseconds")]
    TimestampConversion {
        /// The raw timestamp value, in `unit`.
        value: i128,

        /// The unit the raw timestamp value is expressed in.
        unit: TimeUnit,
    },

    /// An event timestamp resolved to a point in time before the epoch.
    #[error("timestamp {millis} ms is before the epoch")]
    NegativeTimestamp {
        /// The resolved timestamp, in epoch milliseconds.
        millis: i64,
    },

    /// The earliest timestamp is later than the latest timestamp.
    ///
    /// This points to a defect in how events were collected or merged upstream.
    #[error("time window is inverted: start {start} ms is after end {end} ms")]
    InvertedWindow {
        /// The computed window start, in epoch milliseconds.
        start: i64,

        /// The computed window end, in epoch milliseconds.
        end: i64,
    },

    /// All events share the same timestamp, so the rate is undefined.
    #[error("allocation duration is zero")]
    ZeroDuration,

    /// The allocation duration is negative.
    #[error("allocation duration {millis} ms is negative")]
    NegativeDuration {
        /// The offending duration, in milliseconds.
        millis: i64,
    },

    /// Summing the bytes allocated by individual events exceeded `u64::MAX`.
    #[error("total allocated bytes overflows u64")]
    TotalBytesOverflow,
}

/// A specialized `Result` type for allocation rate operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
