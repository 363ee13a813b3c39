//! Rendering of byte rates with binary unit scaling.

use std::fmt;

/// Units that the formatter can scale to, from the largest down.
///
/// A value is rendered in the first unit whose size it reaches. Values below one
/// kibibyte are rendered in bytes. There is no unit beyond gibibytes.
const SCALE: [ByteUnit; 3] = [ByteUnit::Gibibyte, ByteUnit::Mebibyte, ByteUnit::Kibibyte];

/// A binary (base 1024) unit of memory.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ByteUnit {
    /// A single byte.
    Byte,

    /// 1024 bytes.
    Kibibyte,

    /// 1024² bytes.
    Mebibyte,

    /// 1024³ bytes.
    Gibibyte,
}

impl ByteUnit {
    /// The number of bytes in one of this unit.
    #[must_use]
    pub fn bytes(self) -> f64 {
        match self {
            Self::Byte => 1.0,
            Self::Kibibyte => 1024.0,
            Self::Mebibyte => 1_048_576.0,
            Self::Gibibyte => 1_073_741_824.0,
        }
    }

    /// The symbol used when rendering a quantity of this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Byte => "bytes",
            Self::Kibibyte => "KiB",
            Self::Mebibyte => "MiB",
            Self::Gibibyte => "GiB",
        }
    }

    /// Selects the unit that a rate of `bytes_per_second` is rendered in.
    ///
    /// Thresholds are half-open at exact powers of 1024: exactly 1024 bytes per second
    /// is rendered in kibibytes, never in bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use alloc_rate::ByteUnit;
    ///
    /// assert_eq!(ByteUnit::for_bytes_per_second(1023.9), ByteUnit::Byte);
    /// assert_eq!(ByteUnit::for_bytes_per_second(1024.0), ByteUnit::Kibibyte);
    /// assert_eq!(ByteUnit::for_bytes_per_second(5e12), ByteUnit::Gibibyte);
    /// ```
    #[must_use]
    pub fn for_bytes_per_second(bytes_per_second: f64) -> Self {
        SCALE
            .into_iter()
            .find(|unit| bytes_per_second >= unit.bytes())
            .unwrap_or(Self::Byte)
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Renders an allocation rate as a human-readable string such as `102.4 KiB/s`.
///
/// `value` is a rate expressed in `unit` per second. It is rendered in the largest unit
/// it reaches (see [`ByteUnit::for_bytes_per_second()`]) with exactly one decimal digit,
/// rounding ties away from zero.
///
/// # Example
///
/// ```
/// use alloc_rate::{ByteUnit, format_rate};
///
/// assert_eq!(format_rate(1.0, ByteUnit::Byte), "1.0 bytes/s");
/// assert_eq!(format_rate(1024.0, ByteUnit::Byte), "1.0 KiB/s");
/// assert_eq!(format_rate(2048.0, ByteUnit::Kibibyte), "2.0 MiB/s");
/// ```
#[must_use]
pub fn format_rate(value: f64, unit: ByteUnit) -> String {
    let bytes_per_second = value * unit.bytes();
    let display_unit = ByteUnit::for_bytes_per_second(bytes_per_second);
    let scaled = round_to_tenths(bytes_per_second / display_unit.bytes());

    format!("{scaled:.1} {display_unit}/s")
}

// `{:.1}` alone rounds ties to even, so we round ourselves first.
fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
