use std::fmt;

use crate::{ByteUnit, format_rate};

/// Rendered in place of a rate when no meaningful rate exists for the events.
pub const NO_DATA: &str = " ";

/// Rendered in place of a rate when the events describe a physically impossible
/// allocation history.
pub const CALCULATION_ERROR: &str = "Calculation Error";

/// The result of evaluating the allocation rate of a unit of work.
///
/// The `Display` implementation produces the string shown in reports: the formatted rate,
/// [`NO_DATA`] or [`CALCULATION_ERROR`].
///
/// # Example
///
/// ```
/// use alloc_rate::{NO_DATA, RateOutcome};
///
/// assert_eq!(RateOutcome::NoData.to_string(), NO_DATA);
/// assert_eq!(
///     RateOutcome::Rate { bytes_per_second: 3072.0 }.to_string(),
///     "3.0 KiB/s"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum RateOutcome {
    /// A rate was calculated.
    Rate {
        /// The allocation rate, in bytes per second.
        bytes_per_second: f64,
    },

    /// There is no meaningful rate, e.g. because nothing was allocated or because all
    /// allocations happened within the same millisecond.
    NoData,

    /// The events are inconsistent and no rate can be derived from them.
    CalculationError,
}

impl RateOutcome {
    /// The calculated rate in bytes per second, if there is one.
    #[must_use]
    pub fn bytes_per_second(&self) -> Option<f64> {
        match self {
            Self::Rate { bytes_per_second } => Some(*bytes_per_second),
            Self::NoData | Self::CalculationError => None,
        }
    }

    /// Whether no meaningful rate exists.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Whether the events were inconsistent.
    #[must_use]
    pub fn is_calculation_error(&self) -> bool {
        matches!(self, Self::CalculationError)
    }
}

impl fmt::Display for RateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate { bytes_per_second } => {
                f.write_str(&format_rate(*bytes_per_second, ByteUnit::Byte))
            }
            Self::NoData => f.write_str(NO_DATA),
            Self::CalculationError => f.write_str(CALCULATION_ERROR),
        }
    }
}
