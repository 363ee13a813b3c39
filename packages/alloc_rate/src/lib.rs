#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Allocation rate calculation for profiled units of work.
//!
//! Given the memory allocation events a profiler recorded while some unit of work executed
//! (e.g. a single test), this package determines how many bytes per second were allocated
//! and renders that rate as a human-readable string such as `102.4 KiB/s`.
//!
//! The core functionality includes:
//! - [`AllocationEvent`] - The minimal capability required from an event collector's events
//! - [`Partitions`] - Splits events into fast-path and slow-path allocation partitions
//! - [`TimeWindow`] - The span of time covered by both partitions
//! - [`AllocationRateSample`] - Bytes allocated over a duration, convertible to a rate
//! - [`format_rate()`] - Renders a rate with binary unit scaling
//! - [`AllocationRate`] - Ties the above together, reporting every problem as a displayable outcome
//!
//! This package does not collect events. The event collector provides them, together with
//! the total number of bytes allocated across the whole event collection.
//!
//! # Simple usage
//!
//! ```
//! use alloc_rate::{AllocationPath, EventTimestamp, RecordedEvent, compute_allocation_rate};
//!
//! let events = [
//!     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(1_000)),
//!     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(3_000)),
//!     RecordedEvent::new(AllocationPath::SlowPath, EventTimestamp::from_epoch_millis(11_000)),
//! ];
//!
//! // 1 KiB allocated over 10 seconds.
//! assert_eq!(compute_allocation_rate(&events, 1024), "102.4 bytes/s");
//! ```
//!
//! # Outcomes
//!
//! The rate is not always defined. [`AllocationRate::evaluate()`] returns a [`RateOutcome`]
//! that is either a rate, [`RateOutcome::NoData`] when there is nothing to measure, or
//! [`RateOutcome::CalculationError`] when the events are inconsistent (e.g. timestamps before
//! the epoch). The [`ErrorPolicy`] decides which failures count as which:
//!
//! ```
//! use alloc_rate::{
//!     AllocationPath, AllocationRate, ErrorPolicy, EventTimestamp, RateOutcome, RecordedEvent,
//! };
//!
//! let events = [RecordedEvent::new(
//!     AllocationPath::SlowPath,
//!     EventTimestamp::from_epoch_millis(-10),
//! )];
//!
//! assert_eq!(
//!     AllocationRate::new().evaluate(&events, 100),
//!     RateOutcome::CalculationError
//! );
//!
//! let legacy = AllocationRate::builder()
//!     .error_policy(ErrorPolicy::CollapseToNoData)
//!     .build();
//!
//! assert_eq!(legacy.evaluate(&events, 100), RateOutcome::NoData);
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted via the `tracing` crate: a warning whenever an event timestamp
//! cannot be converted and a debug message whenever a failure is turned into an outcome.

mod allocation_rate;
mod allocation_rate_builder;
mod allocation_rate_sample;
mod error;
mod error_policy;
mod event;
mod format;
mod partition;
mod rate_outcome;
mod window;

pub use allocation_rate::*;
pub use allocation_rate_builder::*;
pub use allocation_rate_sample::*;
pub use error::*;
pub use error_policy::*;
pub use event::*;
pub use format::*;
pub use partition::*;
pub use rate_outcome::*;
pub use window::*;
