//! Byte-count and transfer-rate wrappers.
//!
//! [`Size`] and [`Bandwidth`] are distinct types so a byte count can never
//! be passed where a rate is expected. Neither converts implicitly to or from
//! a bare integer, and arithmetic is checked.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

#[allow(clippy::cast_precision_loss)]
fn write_scaled(f: &mut fmt::Formatter<'_>, value: u64, suffix: &str) -> fmt::Result {
    if value < 1024 {
        return write!(f, "{value} B{suffix}");
    }
    let mut scaled = value as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    write!(f, "{scaled:.1} {}{suffix}", UNITS[unit])
}

/// A number of bytes.
///
/// # Examples
///
/// ```
/// use modpaths::Size;
///
/// let a = Size::from_bytes(1024);
/// let b = Size::from_kib(1);
/// assert_eq!(a, b);
/// assert_eq!(a.checked_add(b), Some(Size::from_bytes(2048)));
/// assert_eq!(Size::ZERO.checked_sub(a), None);
/// assert_eq!(Size::from_mib(3).to_string(), "3.0 MiB");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(u64);

impl Size {
    /// Zero bytes.
    pub const ZERO: Self = Self(0);

    /// A size of `bytes` bytes.
    #[must_use]
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// A size of `kib` kibibytes, saturating on overflow.
    #[must_use]
    pub const fn from_kib(kib: u64) -> Self {
        Self(kib.saturating_mul(1024))
    }

    /// A size of `mib` mebibytes, saturating on overflow.
    #[must_use]
    pub const fn from_mib(mib: u64) -> Self {
        Self(mib.saturating_mul(1024 * 1024))
    }

    /// The number of bytes.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Sum of two sizes, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Difference of two sizes, or `None` if `other` is larger.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(diff) => Some(Self(diff)),
            None => None,
        }
    }

    /// The size scaled by `factor`, or `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, factor: u64) -> Option<Self> {
        match self.0.checked_mul(factor) {
            Some(product) => Some(Self(product)),
            None => None,
        }
    }

    /// The rate at which this size transfers over `elapsed`.
    ///
    /// Returns `None` for a zero duration.
    #[must_use]
    pub fn per(self, elapsed: Duration) -> Option<Bandwidth> {
        let millis = elapsed.as_millis();
        if millis == 0 {
            return None;
        }
        let rate = u128::from(self.0) * 1000 / millis;
        Some(Bandwidth(u64::try_from(rate).unwrap_or(u64::MAX)))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scaled(f, self.0, "")
    }
}

impl std::iter::Sum for Size {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(0u64, |acc, size| acc.saturating_add(size.0)))
    }
}

/// A transfer rate in bytes per second.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use modpaths::{Bandwidth, Size};
///
/// let rate = Size::from_mib(10).per(Duration::from_secs(2)).unwrap();
/// assert_eq!(rate, Bandwidth::from_bytes_per_second(5 * 1024 * 1024));
/// assert_eq!(rate.to_string(), "5.0 MiB/s");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bandwidth(u64);

impl Bandwidth {
    /// A rate of `bytes` bytes per second.
    #[must_use]
    pub const fn from_bytes_per_second(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Bytes transferred per second.
    #[must_use]
    pub const fn bytes_per_second(self) -> u64 {
        self.0
    }

    /// How long `size` takes at this rate, or `None` for a zero rate.
    #[must_use]
    pub fn time_for(self, size: Size) -> Option<Duration> {
        if self.0 == 0 {
            return None;
        }
        let millis = u128::from(size.0) * 1000 / u128::from(self.0);
        Some(Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX)))
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scaled(f, self.0, "/s")
    }
}
