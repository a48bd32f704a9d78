// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell values and normalized grouping keys.

extern crate alloc;

use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A point in time, stored as milliseconds since the UNIX epoch.
///
/// Dates compare and group by their underlying timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    #[cfg_attr(feature = "serde", serde(rename = "date"))]
    millis: i64,
}

impl Date {
    /// Creates a date from a millisecond UNIX timestamp.
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Returns the millisecond UNIX timestamp.
    pub const fn millis(self) -> i64 {
        self.millis
    }
}

/// A single typed cell of a [`Record`](crate::Record).
///
/// With the `serde` feature, values are untagged: `null`, a JSON number, a JSON string, or
/// `{"date": <millis>}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A number.
    Num(f64),
    /// A string.
    Str(String),
    /// A date.
    Date(Date),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the grouping key for this value.
    pub fn to_key(&self) -> Key {
        match self {
            Self::Null => Key::Missing,
            Self::Num(v) => Key::num(*v),
            Self::Str(s) => Key::Str(s.clone()),
            Self::Date(d) => Key::Date(*d),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Num(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Num(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A normalized grouping key.
///
/// Keys use strict value equality: strings by content, numbers by value, dates by timestamp.
/// A string never equals a number, even when they print the same.
///
/// Absence of a value (a missing field, [`Value::Null`], or a NaN number) always normalizes
/// to the single [`Key::Missing`] key. It is distinct from the string `"undefined"`.
#[derive(Clone, Debug)]
pub enum Key {
    /// No value.
    Missing,
    /// A string key.
    Str(String),
    /// A numeric key. Use [`Key::num`] to build one; it normalizes `-0.0` and NaN.
    Num(f64),
    /// A date key.
    Date(Date),
}

impl Key {
    /// Builds a numeric key, mapping NaN to [`Key::Missing`] and `-0.0` to `0.0`.
    pub fn num(v: f64) -> Self {
        if v.is_nan() {
            Self::Missing
        } else if v == 0.0 {
            Self::Num(0.0)
        } else {
            Self::Num(v)
        }
    }

    /// Returns `true` for [`Key::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Missing, Self::Missing) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            // Bitwise so that `Eq` and `Hash` agree; `Key::num` canonicalizes zero and NaN.
            (Self::Num(a), Self::Num(b)) => a.to_bits() == b.to_bits(),
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Missing => {}
            Self::Str(s) => s.hash(state),
            Self::Num(v) => v.to_bits().hash(state),
            Self::Date(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("undefined"),
            Self::Str(s) => f.write_str(s),
            Self::Num(v) => write!(f, "{v}"),
            Self::Date(d) => write!(f, "{}", d.millis()),
        }
    }
}

impl From<&Value> for Key {
    fn from(v: &Value) -> Self {
        v.to_key()
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<f64> for Key {
    fn from(v: f64) -> Self {
        Self::num(v)
    }
}
