//! Timestamp-based zettel identifier (`YYYYMMDDHHMMSS`, UTC).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `strftime` format of a zettel ID.
pub const ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Length of every zettel ID.
pub const ID_LEN: usize = 14;

/// Human readable form of an ID timestamp.
pub const PRETTY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A unique identifier for a zettel, which is also the name of its folder.
///
/// IDs are fixed-width UTC timestamps, so lexicographic order is
/// chronological order.
///
/// # Examples
///
/// ```
/// use zet::domain::ZettelId;
///
/// let id: ZettelId = "20220126232605".parse().unwrap();
/// assert_eq!(id.pretty(), "2022-01-26 23:26:05");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZettelId(String);

impl ZettelId {
    /// Creates the ID for a zettel created at `datetime`.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.format(ID_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the creation time encoded in the ID.
    pub fn timestamp(&self) -> DateTime<Utc> {
        // Validated on construction.
        NaiveDateTime::parse_from_str(&self.0, ID_FORMAT)
            .map(|naive| naive.and_utc())
            .unwrap_or_default()
    }

    /// Returns the ID as `YYYY-MM-DD HH:MM:SS`.
    pub fn pretty(&self) -> String {
        self.timestamp().format(PRETTY_FORMAT).to_string()
    }
}

impl fmt::Display for ZettelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ZettelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZettelId(\"{}\")", self.0)
    }
}

/// Error returned when a string is not a valid zettel ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseZettelIdError {
    #[error("'{0}' is not a valid zettel id (not an integer)")]
    NotNumeric(String),

    #[error("'{value}' is not a valid zettel id ({})", length_details(.actual))]
    WrongLength { value: String, actual: usize },

    #[error("'{0}' is not a valid zettel id")]
    InvalidDate(String),
}

fn length_details(actual: &usize) -> String {
    let diff = actual.abs_diff(ID_LEN);
    let plural = if diff > 1 { "s" } else { "" };
    let direction = if *actual > ID_LEN { "long" } else { "short" };
    format!("{diff} char{plural} too {direction}")
}

impl FromStr for ZettelId {
    type Err = ParseZettelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseZettelIdError::NotNumeric(s.to_string()));
        }
        if s.len() != ID_LEN {
            return Err(ParseZettelIdError::WrongLength {
                value: s.to_string(),
                actual: s.len(),
            });
        }
        NaiveDateTime::parse_from_str(s, ID_FORMAT)
            .map_err(|_| ParseZettelIdError::InvalidDate(s.to_string()))?;
        Ok(Self(s.to_string()))
    }
}

impl Serialize for ZettelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ZettelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
